//! Agent-facing browser tools.

mod interaction;

pub use interaction::*;

use std::sync::Arc;

use deepclick_protocols::tool::Tool;

use crate::interaction::ClickSkill;

/// Every tool backed by `skill`.
pub fn browser_tools(skill: Arc<ClickSkill>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ClickTool::new(skill.clone())),
        Arc::new(ElementExistsTool::new(skill)),
    ]
}
