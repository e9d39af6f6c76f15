//! Shadow-DOM and frame aware click tools over the Chrome DevTools Protocol.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐    WebSocket    ┌─────────────┐
//! │ ClickTool /  │──►│ interaction core │  ◄────────────► │ Chrome/Edge │
//! │ ExistsTool   │   │ (PageDriver)     │       CDP       │             │
//! └──────────────┘   └──────────────────┘                 └─────────────┘
//! ```
//!
//! The [`interaction`] module holds the engine: locator resolution across the
//! top document, same-origin frames and open shadow roots, the click executor,
//! and the mutation watcher. It only talks to a page through
//! [`interaction::PageDriver`] and to its owner through
//! [`interaction::BrowserSession`]; [`cdp::PageSession`] and
//! [`manager::BrowserManager`] are the real implementations.
//!
//! ## Setup
//!
//! Start Chrome with remote debugging enabled, or let the manager launch it:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! ## Tools
//!
//! - `browser_click` - Click an element and report what appeared
//! - `browser_element_exists` - Check whether a selector matches anywhere

pub mod cdp;
pub mod interaction;
pub mod manager;
mod mutation;
mod tools;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use interaction::{ClickReport, ClickSkill, InteractionError, InteractionOutcome};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
pub use mutation::{MUTATION_BINDING, MutationHub, OBSERVER_SCRIPT};
pub use tools::*;
