//! Caller-facing interaction results and their wording.

use super::target::Locator;

const SUBMENU_NOTICE: &str = ". Very important: As a consequence, a menu has appeared where you may need to make further selection. Very important: Get all_fields DOM to complete the action.";

/// Result of one interaction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionOutcome {
    /// Short status line.
    pub summary: String,
    /// Summary plus diagnostics (outer markup or error text).
    pub detail: String,
    pub succeeded: bool,
}

impl InteractionOutcome {
    pub fn success(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            succeeded: true,
        }
    }

    pub fn failure(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            succeeded: false,
        }
    }

    /// Scripted click report with the clicked element's markup appended.
    pub(crate) fn clicked(summary: String, outer_html: &str, succeeded: bool) -> Self {
        let detail = format!(
            "{} The clicked element's outer HTML is: {}.",
            summary, outer_html
        );
        Self {
            summary,
            detail,
            succeeded,
        }
    }

    pub(crate) fn option_selected(value: &str, outer_html: &str) -> Self {
        let summary = format!("Select menu option \"{}\" selected", value);
        let detail = format!(
            "{}. The select element's outer HTML is: {}.",
            summary, outer_html
        );
        Self::success(summary, detail)
    }

    /// The locator is presumed stale or invalid; the caller should re-read the page.
    pub(crate) fn invalid_selector(locator: &Locator, error: &dyn std::fmt::Display) -> Self {
        let summary = format!(
            "Unable to click element with selector: \"{}\" since the selector is invalid. Proceed by retrieving DOM again.",
            locator
        );
        let detail = format!("{}. Error: {}", summary, error);
        Self::failure(summary, detail)
    }
}

pub(crate) fn scripted_click_message(locator: &Locator, submenu: bool) -> String {
    let mut message = format!("Executed JavaScript Click on element with selector: {}", locator);
    if submenu {
        message.push_str(SUBMENU_NOTICE);
    }
    message
}

pub(crate) fn stale_element_message(locator: &Locator) -> String {
    format!("Element with selector {} not found", locator)
}

/// Final result of a top-level click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickReport {
    pub locator: Locator,
    pub outcome: InteractionOutcome,
    /// Latest change description delivered during the settle window.
    pub changes: Option<String>,
}

impl ClickReport {
    /// Caller-facing message: the detail, or a not-yet-complete notice when
    /// the click made new content appear.
    pub fn message(&self) -> String {
        match &self.changes {
            Some(changes) => format!(
                "Success: {}.\n As a consequence of this action, new elements have appeared in view: {}. This means that the action to click {} is not yet executed and needs further interaction. Get all_fields DOM to complete the interaction.",
                self.outcome.summary, changes, self.locator
            ),
            None => self.outcome.detail.clone(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.succeeded
    }
}

/// Cut markup to `max_chars` characters, marking the cut with `...`.
pub(crate) fn truncate_markup(markup: &str, max_chars: usize) -> String {
    match markup.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &markup[..idx]),
        None => markup.to_string(),
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
