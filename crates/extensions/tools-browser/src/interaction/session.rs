//! Browser session and mutation-feed contracts.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::driver::PageDriver;
use super::target::Locator;

/// Kind of message surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Action,
    Error,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Action => f.write_str("action"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Receives change descriptions published by the page's mutation observer.
pub trait MutationListener: Send + Sync {
    fn on_mutation(&self, description: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Subscribe/unsubscribe side of the mutation notifications.
pub trait MutationFeed: Send + Sync {
    fn subscribe(&self, listener: Arc<dyn MutationListener>) -> SubscriptionId;

    /// Returns `false` if `id` was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Owner of the page lifecycle.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    async fn current_page(&self) -> Option<Arc<dyn PageDriver>>;

    async fn highlight_element(&self, locator: &Locator, enabled: bool);

    async fn take_screenshot(&self, label: &str, page: &dyn PageDriver);

    async fn notify_user(&self, message: &str, message_type: MessageType);

    fn mutation_feed(&self) -> Arc<dyn MutationFeed>;
}
