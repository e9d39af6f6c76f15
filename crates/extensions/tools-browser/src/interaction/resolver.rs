//! Cross-boundary element resolution.
//!
//! Search order, first match wins:
//! 1. the top-level document,
//! 2. every same-origin frame document, in document order,
//! 3. a depth-first walk over open shadow roots and same-origin frame
//!    documents, each queried directly before its own nested roots.
//!
//! Cross-origin frames are never entered. A failing query inside a nested
//! root is logged and treated as "no match in this subtree"; a failing
//! query on the top-level document is returned as an error.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::driver::{DriverError, PageDriver};
use super::target::{ElementHandle, FrameContent, Locator, NodeId, SearchRoot, TreeNode};

/// Resolve `locator` against the current page load.
pub async fn resolve(
    page: &dyn PageDriver,
    locator: &Locator,
) -> Result<Option<ElementHandle>, DriverError> {
    let tree = page.document_tree().await?;
    resolve_in(page, &tree, locator).await
}

/// Resolve `locator` starting from a document snapshot.
pub async fn resolve_in(
    page: &dyn PageDriver,
    document: &TreeNode,
    locator: &Locator,
) -> Result<Option<ElementHandle>, DriverError> {
    let top = document.as_document_root().ok_or_else(|| {
        DriverError::Protocol(format!("node {} is not a document", document.node_id))
    })?;

    if let Some(node_id) = page.query_selector(top.node_id(), locator).await? {
        debug!("Resolved {} in top-level document", locator);
        return Ok(Some(ElementHandle::new(node_id, top)));
    }

    let mut searched: HashSet<NodeId> = HashSet::new();
    searched.insert(top.node_id());

    for (root, _) in frame_documents(document) {
        searched.insert(root.node_id());
        if let Some(node_id) = query_nested(page, &root, locator).await {
            debug!("Resolved {} in frame document {}", locator, root.node_id());
            return Ok(Some(ElementHandle::new(node_id, root)));
        }
    }

    let mut stack: Vec<(SearchRoot, &TreeNode)> = boundary_children(document);
    stack.reverse();
    while let Some((root, node)) = stack.pop() {
        if searched.insert(root.node_id()) {
            if let Some(node_id) = query_nested(page, &root, locator).await {
                debug!("Resolved {} in nested root {}", locator, root.node_id());
                return Ok(Some(ElementHandle::new(node_id, root)));
            }
        }
        let mut children = boundary_children(node);
        children.reverse();
        stack.extend(children);
    }

    debug!("{} not found in any search root", locator);
    Ok(None)
}

async fn query_nested(
    page: &dyn PageDriver,
    root: &SearchRoot,
    locator: &Locator,
) -> Option<NodeId> {
    match page.query_selector(root.node_id(), locator).await {
        Ok(found) => found,
        Err(e) => {
            warn!(
                "Query for {} in root {} failed, skipping subtree: {}",
                locator,
                root.node_id(),
                e
            );
            None
        }
    }
}

/// Open shadow roots and same-origin frame documents directly beneath
/// `root`'s light DOM, in document order. Each element contributes its
/// shadow root before its frame document.
pub(crate) fn boundary_children(root: &TreeNode) -> Vec<(SearchRoot, &TreeNode)> {
    let mut out = Vec::new();
    for child in &root.children {
        collect_boundaries(child, &mut out);
    }
    out
}

fn collect_boundaries<'a>(node: &'a TreeNode, out: &mut Vec<(SearchRoot, &'a TreeNode)>) {
    if let Some(shadow) = &node.shadow_root {
        out.push((
            SearchRoot::ShadowRoot {
                node_id: shadow.node_id,
                host_id: node.node_id,
            },
            &**shadow,
        ));
    }
    if let Some(FrameContent::Accessible(doc)) = &node.frame {
        if let Some(root) = doc.as_document_root() {
            out.push((root, &**doc));
        }
    }
    for child in &node.children {
        collect_boundaries(child, out);
    }
}

/// Every same-origin frame document in the tree, pre-order, excluding the
/// top-level document itself.
pub(crate) fn frame_documents(document: &TreeNode) -> Vec<(SearchRoot, &TreeNode)> {
    let mut out = Vec::new();
    collect_frames(document, &mut out);
    out
}

fn collect_frames<'a>(node: &'a TreeNode, out: &mut Vec<(SearchRoot, &'a TreeNode)>) {
    for child in &node.children {
        if let Some(FrameContent::Accessible(doc)) = &child.frame {
            if let Some(root) = doc.as_document_root() {
                out.push((root, &**doc));
            }
            collect_frames(doc, out);
        }
        if let Some(shadow) = &child.shadow_root {
            collect_frames(shadow, out);
        }
        collect_frames(child, out);
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
