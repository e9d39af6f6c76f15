//! Side-effect-free existence checks.

use tracing::debug;

use super::driver::{DriverError, PageDriver, PageScript};
use super::target::Locator;

/// Whether `locator` matches anything on the page: a direct query on the
/// top-level document, then the in-page deep search over shadow roots and
/// same-origin frames.
pub async fn exists(page: &dyn PageDriver, locator: &Locator) -> Result<bool, DriverError> {
    let tree = page.document_tree().await?;
    if page.query_selector(tree.node_id, locator).await?.is_some() {
        debug!("{} present in top-level document", locator);
        return Ok(true);
    }

    let found = page
        .evaluate(PageScript::DeepExists, serde_json::json!(locator.as_str()))
        .await?;
    match found.as_bool() {
        Some(found) => {
            debug!("{} present after deep search: {}", locator, found);
            Ok(found)
        }
        None => Err(DriverError::Script(format!(
            "deep search returned non-boolean {}",
            found
        ))),
    }
}
