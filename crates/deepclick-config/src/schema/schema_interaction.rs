//! Interaction engine timing and output limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interaction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// How long to listen for DOM mutations after a click.
    #[serde(default = "default_settle_window_ms")]
    pub settle_window_ms: u64,

    #[serde(default = "default_short_timeout_ms")]
    pub scroll_timeout_ms: u64,

    #[serde(default = "default_short_timeout_ms")]
    pub visibility_timeout_ms: u64,

    #[serde(default = "default_visibility_poll_ms")]
    pub visibility_poll_ms: u64,

    #[serde(default = "default_short_timeout_ms")]
    pub native_click_timeout_ms: u64,

    /// Captured outer HTML is cut to this many characters.
    #[serde(default = "default_outer_html_max_chars")]
    pub outer_html_max_chars: usize,
}

fn default_settle_window_ms() -> u64 {
    500
}

fn default_short_timeout_ms() -> u64 {
    200
}

fn default_visibility_poll_ms() -> u64 {
    50
}

fn default_outer_html_max_chars() -> usize {
    1000
}

impl InteractionConfig {
    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_window_ms)
    }

    pub fn scroll_timeout(&self) -> Duration {
        Duration::from_millis(self.scroll_timeout_ms)
    }

    pub fn visibility_timeout(&self) -> Duration {
        Duration::from_millis(self.visibility_timeout_ms)
    }

    pub fn visibility_poll(&self) -> Duration {
        Duration::from_millis(self.visibility_poll_ms)
    }

    pub fn native_click_timeout(&self) -> Duration {
        Duration::from_millis(self.native_click_timeout_ms)
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            settle_window_ms: default_settle_window_ms(),
            scroll_timeout_ms: default_short_timeout_ms(),
            visibility_timeout_ms: default_short_timeout_ms(),
            visibility_poll_ms: default_visibility_poll_ms(),
            native_click_timeout_ms: default_short_timeout_ms(),
            outer_html_max_chars: default_outer_html_max_chars(),
        }
    }
}
