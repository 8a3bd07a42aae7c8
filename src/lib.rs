//! Evolution API MCP Server Library
//!
//! Exposes the Evolution API (a WhatsApp gateway) to Model Context Protocol
//! clients as a set of generated, schema-validated tools.
//!
//! # Architecture
//!
//! - **api**: HTTP client, retry with exponential backoff, and the
//!   structured error taxonomy every failure is classified into
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: operation catalog, validators, tool generation and registry
//!
//! # Example
//!
//! ```rust,no_run
//! use evolution_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::from_config(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod core;
pub mod domains;

pub use api::{Outcome, StructuredError};
pub use core::{Config, Error, McpServer, Result};
