//! [`BrowserSession`] implementation for the browser manager.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::interaction::{BrowserSession, Locator, MessageType, MutationFeed, PageDriver};
use super::BrowserManager;

#[async_trait]
impl BrowserSession for BrowserManager {
    async fn current_page(&self) -> Option<Arc<dyn PageDriver>> {
        self.current_session()
            .await
            .map(|session| session as Arc<dyn PageDriver>)
    }

    async fn highlight_element(&self, locator: &Locator, enabled: bool) {
        debug!("Highlight {} requested for {}", if enabled { "on" } else { "off" }, locator);
    }

    async fn take_screenshot(&self, label: &str, page: &dyn PageDriver) {
        let Some(dir) = &self.config.screenshots_dir else {
            return;
        };

        let image = match page.screenshot().await {
            Ok(image) => image,
            Err(e) => {
                warn!("Screenshot {} failed: {}", label, e);
                return;
            }
        };

        let path = screenshot_path(dir, label, unix_millis());
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!("Failed to create screenshots directory {}: {}", dir.display(), e);
            return;
        }
        match tokio::fs::write(&path, image).await {
            Ok(()) => debug!("Saved screenshot {}", path.display()),
            Err(e) => warn!("Failed to write screenshot {}: {}", path.display(), e),
        }
    }

    async fn notify_user(&self, message: &str, message_type: MessageType) {
        match message_type {
            MessageType::Error => warn!(kind = %message_type, "{}", message),
            _ => info!(kind = %message_type, "{}", message),
        }
    }

    fn mutation_feed(&self) -> Arc<dyn MutationFeed> {
        self.hub.clone()
    }
}

/// `{dir}/{millis}_{label}.png`
pub(super) fn screenshot_path(dir: &Path, label: &str, millis: u128) -> PathBuf {
    dir.join(format!("{}_{}.png", millis, label))
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
