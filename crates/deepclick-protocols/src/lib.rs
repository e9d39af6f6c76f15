//! # deepclick Protocols
//!
//! Interface definitions shared between the browser tools and whatever drives
//! them (a planning loop, the CLI, tests). Contains no browser logic.
//!
//! ## Core Traits
//!
//! - [`Tool`] - An agent-invocable action with a JSON parameter schema

pub mod error;
pub mod tool;
pub mod types;

pub use error::ToolError;
pub use tool::{AbortSignal, Tool, ToolContext, ToolDefinition, ToolResult};
pub use types::*;
