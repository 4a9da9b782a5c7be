//! Domains module containing business logic organized by bounded contexts.
//!
//! Each submodule represents a distinct domain of functionality. This server
//! has a single domain: the tools that clients can invoke.

pub mod tools;
