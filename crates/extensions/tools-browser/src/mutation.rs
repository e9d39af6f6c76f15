//! DOM mutation notifications.
//!
//! Each page runs [`OBSERVER_SCRIPT`], which reports newly added elements with
//! visible text through the [`MUTATION_BINDING`] CDP binding. The page
//! session forwards those payloads into a [`MutationHub`], which fans them
//! out to whoever is subscribed at that moment.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::interaction::{MutationFeed, MutationListener, SubscriptionId};

/// Name of the `Runtime.addBinding` function the observer calls.
pub const MUTATION_BINDING: &str = "__deepclickMutation";

/// Installs a `MutationObserver` once per document and reports added,
/// text-bearing elements as a JSON array of `{tag, content}`.
pub const OBSERVER_SCRIPT: &str = r#"(() => {
    if (window.__deepclickObserverInstalled) {
        return;
    }
    window.__deepclickObserverInstalled = true;
    const report = window.__deepclickMutation;
    const start = () => {
        const observer = new MutationObserver((mutations) => {
            const changes = [];
            for (const mutation of mutations) {
                for (const node of mutation.addedNodes) {
                    if (node.nodeType !== Node.ELEMENT_NODE) {
                        continue;
                    }
                    const text = (node.innerText || '').trim();
                    if (text.length === 0) {
                        continue;
                    }
                    changes.push({ tag: node.tagName.toLowerCase(), content: text.substring(0, 200) });
                }
            }
            if (changes.length > 0 && typeof report === 'function') {
                report(JSON.stringify(changes));
            }
        });
        observer.observe(document.documentElement || document, { childList: true, subtree: true });
    };
    if (document.readyState === 'loading') {
        document.addEventListener('DOMContentLoaded', start, { once: true });
    } else {
        start();
    }
})()"#;

/// Id-keyed listener registry.
#[derive(Default)]
pub struct MutationHub {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, Arc<dyn MutationListener>)>>,
}

impl MutationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `description` to every current listener.
    pub fn publish(&self, description: &str) {
        let listeners: Vec<Arc<dyn MutationListener>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        trace!("Publishing mutation to {} listeners", listeners.len());
        for listener in listeners {
            listener.on_mutation(description);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl MutationFeed for MutationHub {
    fn subscribe(&self, listener: Arc<dyn MutationListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.lock().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}
