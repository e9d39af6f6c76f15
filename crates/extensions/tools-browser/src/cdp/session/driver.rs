//! [`PageDriver`] implementation over a CDP page session.

use async_trait::async_trait;
use serde_json::Value;
use url::{Origin, Url};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{DOCUMENT_NODE, DomNode, ELEMENT_NODE, ScreenshotFormat};
use crate::interaction::{
    DriverError, ElementHandle, ElementScript, FrameContent, Locator, NodeId, PageDriver,
    PageScript, TreeNode,
};

use super::core::PageSession;

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::JavaScript(msg) => DriverError::Script(msg),
            CdpError::Timeout(msg) => DriverError::Timeout(msg),
            CdpError::SessionClosed | CdpError::WebSocket(_) => DriverError::Closed,
            other => DriverError::Protocol(other.to_string()),
        }
    }
}

#[async_trait]
impl PageDriver for PageSession {
    async fn document_tree(&self) -> Result<TreeNode, DriverError> {
        let root = self.get_document().await?;
        Ok(tree_from_dom(&root))
    }

    async fn query_selector(
        &self,
        scope: NodeId,
        locator: &Locator,
    ) -> Result<Option<NodeId>, DriverError> {
        Ok(self.query_selector_in(scope, locator.as_str()).await?)
    }

    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<(), DriverError> {
        Ok(self.scroll_into_view_if_needed(element.node_id()).await?)
    }

    async fn call_on_element(
        &self,
        element: &ElementHandle,
        script: ElementScript,
        args: Vec<Value>,
    ) -> Result<Value, DriverError> {
        let object_id = self
            .resolve_node(element.node_id())
            .await?
            .object_id
            .ok_or_else(|| {
                DriverError::Protocol(format!("Node {} has no remote object", element.node_id()))
            })?;

        let result = self
            .call_function_on(&object_id, script.source(), args)
            .await;
        self.release_object(&object_id).await;
        Ok(result?)
    }

    async fn evaluate(&self, script: PageScript, arg: Value) -> Result<Value, DriverError> {
        Ok(PageSession::evaluate(self, &script.invocation(&arg)).await?)
    }

    async fn native_click(&self, element: &ElementHandle) -> Result<(), DriverError> {
        Ok(self.click_node(element.node_id()).await?)
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        Ok(self.capture_screenshot(ScreenshotFormat::Png).await?)
    }
}

/// Convert a pierced `DOM.getDocument` tree into a [`TreeNode`] snapshot.
///
/// Frame documents whose origin differs from their parent document are
/// reported as [`FrameContent::CrossOrigin`], matching what a page script
/// sees through `contentDocument`.
pub(crate) fn tree_from_dom(root: &DomNode) -> TreeNode {
    let origin = document_origin(root.document_url.as_deref(), None);
    convert(root, None, &origin)
}

fn convert(node: &DomNode, owner_frame: Option<&str>, origin: &Option<Origin>) -> TreeNode {
    let children = node
        .children
        .iter()
        .flatten()
        .map(|child| convert(child, None, origin))
        .collect();

    let tree = match node.node_type {
        DOCUMENT_NODE => TreeNode::document(node.node_id, owner_frame.map(str::to_string)),
        ELEMENT_NODE => {
            let mut element = TreeNode::element(node.node_id, node.tag());
            if let Some(shadow) = node
                .shadow_roots
                .iter()
                .flatten()
                .find(|root| root.is_open_shadow_root())
            {
                element = element.with_shadow_root(convert(shadow, None, origin));
            }
            if element.is_frame_owner() {
                element = element.with_frame(frame_content(node, origin));
            }
            element
        }
        _ if node.is_open_shadow_root() => TreeNode::shadow_root(node.node_id),
        _ => TreeNode::other(node.node_id),
    };
    tree.with_children(children)
}

fn frame_content(owner: &DomNode, parent_origin: &Option<Origin>) -> FrameContent {
    let Some(doc) = owner.content_document.as_deref() else {
        return FrameContent::CrossOrigin;
    };
    let origin = document_origin(doc.document_url.as_deref(), parent_origin.as_ref());
    if origin != *parent_origin {
        return FrameContent::CrossOrigin;
    }
    FrameContent::Accessible(Box::new(convert(doc, owner.frame_id.as_deref(), &origin)))
}

/// Origin of a document URL. `about:` documents inherit their parent's.
fn document_origin(url: Option<&str>, parent: Option<&Origin>) -> Option<Origin> {
    match url {
        None | Some("") => parent.cloned(),
        Some(u) if u.starts_with("about:") => parent.cloned(),
        Some(u) => Url::parse(u).ok().map(|parsed| parsed.origin()),
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
