//! Transports the MCP server can be reached over.
//!
//! - **STDIO**: standard input/output, the usual MCP mode (feature `stdio`)
//! - **TCP**: line-delimited JSON-RPC over a TCP socket (feature `tcp`)
//!
//! Both hand every connection to an [`McpServer`](crate::core::McpServer)
//! clone; the server itself is transport-agnostic.

mod config;
mod error;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
