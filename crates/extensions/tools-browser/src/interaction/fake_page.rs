//! In-memory page and session used by the interaction tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::mutation::MutationHub;

use super::driver::{DriverError, ElementScript, PageDriver, PageScript};
use super::session::{BrowserSession, MessageType, MutationFeed};
use super::target::{ElementHandle, FrameContent, Locator, NodeId, TreeNode};

/// What happens in the page when an element is clicked.
#[derive(Debug, Clone)]
pub(crate) enum ClickEffect {
    /// `aria-expanded` flips from `false` to `true`.
    ExpandsMenu,
    /// New content appears and is reported right away.
    Mutates(String),
    /// New content is reported after a delay.
    MutatesAfter(Duration, String),
    /// The click handler throws.
    Throws(String),
}

/// Minimal selector support: `tag`, `#id`, `[name]`, `[name='value']`, and a
/// tag followed by one of the others.
#[derive(Debug)]
struct Selector {
    tag: Option<String>,
    attr: Option<(String, Option<String>)>,
}

impl Selector {
    fn parse(locator: &Locator) -> Result<Self, DriverError> {
        let s = locator.as_str().trim();
        let invalid = || {
            DriverError::Script(format!(
                "SyntaxError: '{}' is not a valid selector",
                locator
            ))
        };
        let tag_len = s
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(s.len());
        let (tag, rest) = s.split_at(tag_len);
        let tag = (!tag.is_empty()).then(|| tag.to_ascii_lowercase());

        let attr = if rest.is_empty() {
            None
        } else if let Some(id) = rest.strip_prefix('#') {
            if id.is_empty() {
                return Err(invalid());
            }
            Some(("id".to_string(), Some(id.to_string())))
        } else if let Some(inner) = rest.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim_matches(|c| c == '\'' || c == '"');
                    Some((name.trim().to_string(), Some(value.to_string())))
                }
                None if !inner.trim().is_empty() => Some((inner.trim().to_string(), None)),
                None => return Err(invalid()),
            }
        } else {
            return Err(invalid());
        };

        if tag.is_none() && attr.is_none() {
            return Err(invalid());
        }
        Ok(Self { tag, attr })
    }

    fn matches(&self, tag: &str, attrs: &[(String, String)]) -> bool {
        if let Some(expected) = &self.tag {
            if expected != tag {
                return false;
            }
        }
        match &self.attr {
            None => true,
            Some((name, expected)) => attrs.iter().any(|(n, v)| {
                n == name && expected.as_ref().is_none_or(|expected| expected == v)
            }),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeLog {
    pub queried_scopes: Vec<NodeId>,
    pub scrolled: Vec<NodeId>,
    pub scripted_clicks: Vec<NodeId>,
    pub native_clicks: Vec<NodeId>,
    /// `(select node, value)`.
    pub selections: Vec<(NodeId, String)>,
    pub evaluations: Vec<PageScript>,
    pub screenshots: usize,
}

pub(crate) struct FakePage {
    tree: TreeNode,
    attrs: HashMap<NodeId, Vec<(String, String)>>,
    effects: HashMap<NodeId, ClickEffect>,
    hidden: HashSet<NodeId>,
    /// Present in the resolver's snapshot but gone from the live DOM.
    detached: HashSet<NodeId>,
    failing_scopes: HashSet<NodeId>,
    hanging_scroll: bool,
    hub: Option<Arc<MutationHub>>,
    pub log: Mutex<FakeLog>,
}

impl FakePage {
    pub fn new(tree: TreeNode) -> Self {
        Self {
            tree,
            attrs: HashMap::new(),
            effects: HashMap::new(),
            hidden: HashSet::new(),
            detached: HashSet::new(),
            failing_scopes: HashSet::new(),
            hanging_scroll: false,
            hub: None,
            log: Mutex::new(FakeLog::default()),
        }
    }

    pub fn attr(mut self, node_id: NodeId, name: &str, value: &str) -> Self {
        self.attrs
            .entry(node_id)
            .or_default()
            .push((name.to_string(), value.to_string()));
        self
    }

    pub fn effect(mut self, node_id: NodeId, effect: ClickEffect) -> Self {
        self.effects.insert(node_id, effect);
        self
    }

    pub fn hidden(mut self, node_id: NodeId) -> Self {
        self.hidden.insert(node_id);
        self
    }

    pub fn detached(mut self, node_id: NodeId) -> Self {
        self.detached.insert(node_id);
        self
    }

    pub fn failing_scope(mut self, node_id: NodeId) -> Self {
        self.failing_scopes.insert(node_id);
        self
    }

    pub fn hanging_scroll(mut self) -> Self {
        self.hanging_scroll = true;
        self
    }

    pub fn with_hub(mut self, hub: Arc<MutationHub>) -> Self {
        self.hub = Some(hub);
        self
    }

    fn find<'a>(node: &'a TreeNode, node_id: NodeId) -> Option<&'a TreeNode> {
        if node.node_id == node_id {
            return Some(node);
        }
        let nested = node.shadow_root.iter().map(|s| &**s).chain(
            match &node.frame {
                Some(FrameContent::Accessible(doc)) => Some(&**doc),
                _ => None,
            },
        );
        nested
            .chain(node.children.iter())
            .find_map(|child| Self::find(child, node_id))
    }

    /// Ancestor chain (excluding the node) following light DOM, shadow and frame edges.
    fn path_to(node: &TreeNode, node_id: NodeId, path: &mut Vec<NodeId>) -> bool {
        if node.node_id == node_id {
            return true;
        }
        path.push(node.node_id);
        let mut nested: Vec<&TreeNode> = node.children.iter().collect();
        if let Some(shadow) = &node.shadow_root {
            nested.push(shadow);
        }
        if let Some(FrameContent::Accessible(doc)) = &node.frame {
            nested.push(doc);
        }
        for child in nested {
            if Self::path_to(child, node_id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    fn tag_of(&self, node_id: NodeId) -> Option<String> {
        Self::find(&self.tree, node_id).and_then(|n| n.tag().map(str::to_string))
    }

    fn attrs_of(&self, node_id: NodeId) -> &[(String, String)] {
        self.attrs.get(&node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn owner_select(&self, node_id: NodeId) -> Option<NodeId> {
        let mut path = Vec::new();
        if !Self::path_to(&self.tree, node_id, &mut path) {
            return None;
        }
        path.into_iter()
            .rev()
            .find(|id| self.tag_of(*id).as_deref() == Some("select"))
    }

    fn outer_html(&self, node_id: NodeId) -> String {
        let tag = self.tag_of(node_id).unwrap_or_default();
        let attrs: String = self
            .attrs_of(node_id)
            .iter()
            .map(|(n, v)| format!(" {}=\"{}\"", n, v))
            .collect();
        format!("<{}{}></{}>", tag, attrs, tag)
    }

    /// First light-DOM match under `scope`, skipping detached nodes when `live`.
    fn query_light(&self, scope: &TreeNode, selector: &Selector, live: bool) -> Option<NodeId> {
        for child in &scope.children {
            if let Some(tag) = child.tag() {
                let gone = live && self.detached.contains(&child.node_id);
                if !gone && selector.matches(tag, self.attrs_of(child.node_id)) {
                    return Some(child.node_id);
                }
            }
            if let Some(found) = self.query_light(child, selector, live) {
                return Some(found);
            }
        }
        None
    }

    /// Mirrors the in-page deep search over the live DOM.
    fn deep_find(&self, root: &TreeNode, selector: &Selector) -> Option<NodeId> {
        if let Some(found) = self.query_light(root, selector, true) {
            return Some(found);
        }
        let mut elements = Vec::new();
        Self::light_elements(root, &mut elements);
        for el in elements {
            if let Some(shadow) = &el.shadow_root {
                if let Some(found) = self.deep_find(shadow, selector) {
                    return Some(found);
                }
            }
            if !el.is_frame_owner() {
                continue;
            }
            if let Some(FrameContent::Accessible(doc)) = &el.frame {
                if let Some(found) = self.deep_find(doc, selector) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn light_elements<'a>(node: &'a TreeNode, out: &mut Vec<&'a TreeNode>) {
        for child in &node.children {
            out.push(child);
            Self::light_elements(child, out);
        }
    }

    fn run_effect(&self, node_id: NodeId) -> Result<bool, DriverError> {
        match self.effects.get(&node_id) {
            None => Ok(false),
            Some(ClickEffect::ExpandsMenu) => Ok(true),
            Some(ClickEffect::Mutates(description)) => {
                if let Some(hub) = &self.hub {
                    hub.publish(description);
                }
                Ok(false)
            }
            Some(ClickEffect::MutatesAfter(delay, description)) => {
                if let Some(hub) = self.hub.clone() {
                    let delay = *delay;
                    let description = description.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        hub.publish(&description);
                    });
                }
                Ok(false)
            }
            Some(ClickEffect::Throws(message)) => Err(DriverError::Script(message.clone())),
        }
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn document_tree(&self) -> Result<TreeNode, DriverError> {
        Ok(self.tree.clone())
    }

    async fn query_selector(
        &self,
        scope: NodeId,
        locator: &Locator,
    ) -> Result<Option<NodeId>, DriverError> {
        self.log.lock().queried_scopes.push(scope);
        if self.failing_scopes.contains(&scope) {
            return Err(DriverError::Protocol(format!("Could not find node {}", scope)));
        }
        let selector = Selector::parse(locator)?;
        let root = Self::find(&self.tree, scope)
            .ok_or_else(|| DriverError::Protocol(format!("No node with id {}", scope)))?;
        Ok(self.query_light(root, &selector, false))
    }

    async fn scroll_into_view(&self, element: &ElementHandle) -> Result<(), DriverError> {
        if self.hanging_scroll {
            std::future::pending::<()>().await;
        }
        self.log.lock().scrolled.push(element.node_id());
        Ok(())
    }

    async fn call_on_element(
        &self,
        element: &ElementHandle,
        script: ElementScript,
        args: Vec<Value>,
    ) -> Result<Value, DriverError> {
        let node_id = element.node_id();
        match script {
            ElementScript::TagName => Ok(json!(self.tag_of(node_id).unwrap_or_default())),
            ElementScript::OuterHtml => {
                let target = if self.tag_of(node_id).as_deref() == Some("option") {
                    self.owner_select(node_id).unwrap_or(node_id)
                } else {
                    node_id
                };
                Ok(json!(self.outer_html(target)))
            }
            ElementScript::AttributeValue => {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                Ok(self
                    .attrs_of(node_id)
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| json!(v))
                    .unwrap_or(Value::Null))
            }
            ElementScript::SelectInOwner => {
                let value = args.first().and_then(Value::as_str).unwrap_or_default();
                match self.owner_select(node_id) {
                    Some(select) => {
                        self.log.lock().selections.push((select, value.to_string()));
                        Ok(json!(true))
                    }
                    None => Ok(json!(false)),
                }
            }
            ElementScript::IsVisible => Ok(json!(!self.hidden.contains(&node_id))),
        }
    }

    async fn evaluate(&self, script: PageScript, arg: Value) -> Result<Value, DriverError> {
        self.log.lock().evaluations.push(script);
        let locator = Locator::new(arg.as_str().unwrap_or_default());
        let selector = Selector::parse(&locator)?;
        let found = self.deep_find(&self.tree, &selector);
        match script {
            PageScript::DeepExists => Ok(json!(found.is_some())),
            PageScript::DeepClick => {
                let Some(node_id) = found else {
                    return Ok(json!({ "status": "not_found" }));
                };
                if self.tag_of(node_id).as_deref() == Some("option") {
                    return Ok(json!({ "status": "option_selected", "value": "" }));
                }
                let submenu = self.run_effect(node_id)?;
                self.log.lock().scripted_clicks.push(node_id);
                Ok(json!({ "status": "clicked", "submenu": submenu }))
            }
        }
    }

    async fn native_click(&self, element: &ElementHandle) -> Result<(), DriverError> {
        self.run_effect(element.node_id())?;
        self.log.lock().native_clicks.push(element.node_id());
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.log.lock().screenshots += 1;
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

#[derive(Debug, Default)]
pub(crate) struct SessionLog {
    /// Ordered record of session calls, e.g. `screenshot:click_start`.
    pub calls: Vec<String>,
    pub notifications: Vec<(String, MessageType)>,
}

pub(crate) struct FakeSession {
    page: Option<Arc<FakePage>>,
    hub: Arc<MutationHub>,
    pub log: Mutex<SessionLog>,
}

impl FakeSession {
    pub fn new(page: Option<Arc<FakePage>>, hub: Arc<MutationHub>) -> Self {
        Self {
            page,
            hub,
            log: Mutex::new(SessionLog::default()),
        }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn current_page(&self) -> Option<Arc<dyn PageDriver>> {
        self.page.clone().map(|p| p as Arc<dyn PageDriver>)
    }

    async fn highlight_element(&self, locator: &Locator, enabled: bool) {
        let listeners = self.hub.listener_count();
        self.log
            .lock()
            .calls
            .push(format!("highlight:{}:{}:listeners={}", locator, enabled, listeners));
    }

    async fn take_screenshot(&self, label: &str, page: &dyn PageDriver) {
        let _ = page.screenshot().await;
        self.log.lock().calls.push(format!("screenshot:{}", label));
    }

    async fn notify_user(&self, message: &str, message_type: MessageType) {
        let mut log = self.log.lock();
        log.calls.push(format!("notify:{}", message_type));
        log.notifications.push((message.to_string(), message_type));
    }

    fn mutation_feed(&self) -> Arc<dyn MutationFeed> {
        self.hub.clone()
    }
}
