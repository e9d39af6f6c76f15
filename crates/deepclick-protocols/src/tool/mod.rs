//! Tool protocol definitions.
//!
//! Tools are how a driving loop asks the engine to act on the page.

mod context;
mod definition;
mod result;
mod traits;

pub use context::*;
pub use definition::*;
pub use result::*;
pub use traits::*;
