//! Shadow-DOM and frame aware element interaction.
//!
//! Locators are resolved across the top document, same-origin frames and
//! open shadow roots. Clicks are performed by an in-page script and their
//! visible consequences are collected through the page's mutation feed.

mod driver;
mod error;
mod executor;
mod outcome;
mod presence;
mod resolver;
mod scripts;
mod session;
mod skill;
mod target;
mod watcher;

#[cfg(test)]
pub(crate) mod fake_page;

pub use driver::{DriverError, ElementScript, PageDriver, PageScript};
pub use error::InteractionError;
pub use executor::{ExecutorSettings, InteractionExecutor, pre_delay_from_secs};
pub use outcome::{ClickReport, InteractionOutcome};
pub use presence::exists;
pub use resolver::resolve;
pub use session::{BrowserSession, MessageType, MutationFeed, MutationListener, SubscriptionId};
pub use skill::ClickSkill;
pub use target::{
    ElementHandle, FRAME_OWNER_TAGS, FrameContent, Locator, NodeId, NodeKind, SearchRoot, TreeNode,
};
pub use watcher::{MutationCapture, MutationWatcher, Observed, Subscription};
