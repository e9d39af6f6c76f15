//! Mutation observation around an interaction.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use super::session::{MutationFeed, MutationListener, SubscriptionId};

/// Keeps the latest non-empty change description it receives.
#[derive(Debug, Default)]
pub struct MutationCapture {
    latest: Mutex<Option<String>>,
}

impl MutationCapture {
    pub fn take(&self) -> Option<String> {
        self.latest.lock().take()
    }
}

impl MutationListener for MutationCapture {
    fn on_mutation(&self, description: &str) {
        if description.is_empty() {
            return;
        }
        debug!("Mutation observed: {}", description);
        *self.latest.lock() = Some(description.to_string());
    }
}

/// Registration on a feed, removed when dropped.
pub struct Subscription {
    feed: Arc<dyn MutationFeed>,
    id: SubscriptionId,
}

impl Subscription {
    pub fn new(feed: Arc<dyn MutationFeed>, listener: Arc<dyn MutationListener>) -> Self {
        let id = feed.subscribe(listener);
        Self { feed, id }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.feed.unsubscribe(self.id);
    }
}

/// Result of an observed action.
#[derive(Debug)]
pub struct Observed<T> {
    pub result: T,
    /// Latest change description delivered between subscription and the end
    /// of the settle window.
    pub mutation: Option<String>,
}

pub struct MutationWatcher {
    feed: Arc<dyn MutationFeed>,
    settle_window: Duration,
}

impl MutationWatcher {
    pub fn new(feed: Arc<dyn MutationFeed>, settle_window: Duration) -> Self {
        Self {
            feed,
            settle_window,
        }
    }

    /// Subscribe, run `action`, hold for the settle window, unsubscribe.
    ///
    /// Dropping the returned future early unsubscribes as well.
    pub async fn observe<F, T>(&self, action: F) -> Observed<T>
    where
        F: Future<Output = T>,
    {
        let capture = Arc::new(MutationCapture::default());
        let subscription = Subscription::new(self.feed.clone(), capture.clone());

        let result = action.await;
        tokio::time::sleep(self.settle_window).await;
        drop(subscription);

        Observed {
            result,
            mutation: capture.take(),
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
