//! Tools domain module.
//!
//! This module turns the Evolution API operation catalog into MCP tools.
//! Each tool validates its arguments, maps them onto an HTTP request and
//! runs it through the injected [`ApiTransport`](crate::api::ApiTransport).
//!
//! ## Architecture
//!
//! - `catalog.rs` - Operation and parameter descriptor types
//! - `definitions/` - The catalog itself, one file per controller
//! - `schema.rs` - Argument validators and their JSON Schema
//! - `examples.rs` - Example arguments for each tool
//! - `handlers.rs` - Request building and dispatch
//! - `factory.rs` - Builds one tool from one operation
//! - `registry.rs` - Name-keyed tool store
//! - `generator.rs` - Bulk generation, consistency checks and stats
//! - `router.rs` - Dynamic ToolRouter builder for STDIO/TCP transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding an Operation
//!
//! Append an [`OperationDescriptor`] to the controller's `OPERATIONS` slice
//! in `definitions/`. The generator, registry and router pick it up without
//! further changes.

pub mod catalog;
pub mod definitions;
mod error;
pub mod examples;
pub mod factory;
pub mod generator;
pub mod handlers;
mod registry;
pub mod router;
pub mod schema;
mod tool;
pub mod value;

pub use catalog::{ExampleValue, OperationDescriptor, ParamLocation, ParamType, ParameterDescriptor};
pub use error::ToolError;
pub use factory::{DEFAULT_NAME_PREFIX, ToolCollaborators, ToolFactory};
pub use generator::{GenerateOptions, GenerationStats, ToolGenerator, ValidationIssue};
pub use handlers::{OperationHandler, PreparedRequest, ToolHandler};
pub use registry::{RegistryStats, ToolPatch, ToolRegistry};
pub use router::build_tool_router;
pub use schema::{ParamRule, Validator};
pub use tool::Tool;
pub use value::{ParamMap, ParamValue};
