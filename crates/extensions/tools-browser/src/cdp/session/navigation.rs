//! Navigation operations for CDP page session.

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const LOAD_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to URL and wait until the document is interactive.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"]
            .as_str()
            .unwrap_or("main")
            .to_string();

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Wait for page load.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let poll = async {
            loop {
                let state = self.evaluate("document.readyState").await?;
                if matches!(state.as_str(), Some("complete") | Some("interactive")) {
                    return Ok::<(), CdpError>(());
                }
                tokio::time::sleep(LOAD_POLL).await;
            }
        };

        tokio::time::timeout(LOAD_TIMEOUT, poll)
            .await
            .map_err(|_| CdpError::Timeout("Page load timeout".to_string()))?
    }
}
