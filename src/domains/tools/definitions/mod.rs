//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod echo;
pub mod fetch;
pub mod timeserver;

pub use echo::{EchoParams, EchoTool};
pub use fetch::{FetchParams, FetchTool};
pub use timeserver::{TimeServerParams, TimeServerTool};
