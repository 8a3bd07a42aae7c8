//! Domains module containing business logic organized by bounded contexts.
//!
//! The server has a single domain: tools generated from the Evolution API
//! operation catalog.

pub mod tools;
