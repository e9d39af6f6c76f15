//! Page driver contract consumed by the interaction engine.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::target::{ElementHandle, Locator, NodeId, TreeNode};

/// Functions run with an element bound as `this`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementScript {
    /// Lower-cased tag name.
    TagName,
    /// Serialized outer markup. For an `option`, the owning `select`'s markup.
    OuterHtml,
    /// Attribute named by the first argument, falling back to the DOM property.
    AttributeValue,
    /// Select the value given as first argument in the owning `select` and
    /// fire `input`/`change`. Returns `false` when there is no owner.
    SelectInOwner,
    IsVisible,
}

/// Scripts evaluated against the live page with one JSON argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageScript {
    /// Deep search plus click; returns a click report object.
    DeepClick,
    /// Deep search only; returns a boolean.
    DeepExists,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Page closed")]
    Closed,
}

/// One page of the browser, as the interaction engine sees it.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Pierced snapshot of the current page load.
    async fn document_tree(&self) -> Result<TreeNode, DriverError>;

    /// Query a single scope. Never crosses frame or shadow boundaries.
    async fn query_selector(
        &self,
        scope: NodeId,
        locator: &Locator,
    ) -> Result<Option<NodeId>, DriverError>;

    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<(), DriverError>;

    async fn call_on_element(
        &self,
        element: &ElementHandle,
        script: ElementScript,
        args: Vec<Value>,
    ) -> Result<Value, DriverError>;

    async fn evaluate(&self, script: PageScript, arg: Value) -> Result<Value, DriverError>;

    /// Direct input-level click at the element's centre.
    async fn native_click(&self, element: &ElementHandle) -> Result<(), DriverError>;

    /// PNG screenshot of the viewport.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;
}
