//! BrowserManager page management.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cdp::PageSession;
use super::manager_core::PageState;
use super::{BrowserError, BrowserManager};

impl BrowserManager {
    /// Open a new page on `url` and make it the current page.
    ///
    /// The mutation observer is installed before navigating so the first
    /// document is observed too.
    pub async fn new_page(&self, url: &str) -> Result<String, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;

        let session = client.new_page(None).await?;
        session.install_mutation_observer(self.hub.clone()).await?;
        session.navigate(url).await?;

        let page_id = {
            let mut counter = self.page_counter.write().await;
            *counter += 1;
            format!("page_{}", *counter)
        };

        self.pages.write().await.insert(
            page_id.clone(),
            PageState {
                session: Arc::new(session),
                url: url.to_string(),
            },
        );
        *self.current.write().await = Some(page_id.clone());

        info!("Opened {}: {}", page_id, url);
        Ok(page_id)
    }

    /// Navigate an open page and make it the current page.
    pub async fn navigate(&self, page_id: &str, url: &str) -> Result<(), BrowserError> {
        let session = self.get_session(page_id).await?;
        session.navigate(url).await?;

        if let Some(state) = self.pages.write().await.get_mut(page_id) {
            state.url = url.to_string();
        }
        *self.current.write().await = Some(page_id.to_string());

        debug!("Navigated {} to {}", page_id, url);
        Ok(())
    }

    /// Close a page. Closing the current page leaves no current page.
    pub async fn close_page(&self, page_id: &str) -> Result<(), BrowserError> {
        let state = self.pages.write().await.remove(page_id);
        if let Some(state) = state {
            let client = self.client().await?;
            client.close_page(&state.session).await?;
        }

        let mut current = self.current.write().await;
        if current.as_deref() == Some(page_id) {
            *current = None;
        }

        debug!("Closed page {}", page_id);
        Ok(())
    }

    /// List all open pages as `(page_id, url)`.
    pub async fn list_pages(&self) -> Vec<(String, String)> {
        let mut pages: Vec<(String, String)> = self
            .pages
            .read()
            .await
            .iter()
            .map(|(id, state)| (id.clone(), state.url.clone()))
            .collect();
        pages.sort();
        pages
    }

    pub async fn current_page_id(&self) -> Option<String> {
        self.current.read().await.clone()
    }

    /// Session of the current page, if any.
    pub async fn current_session(&self) -> Option<Arc<PageSession>> {
        let page_id = self.current_page_id().await?;
        self.get_session(&page_id).await.ok()
    }
}
