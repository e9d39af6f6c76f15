//! Error types for the protocol layer.

mod tool;

pub use tool::*;
