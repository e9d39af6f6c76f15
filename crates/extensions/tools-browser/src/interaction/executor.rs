//! Click execution: resolve, scroll, wait for visibility, then either select
//! an `option` in its owning `select` or run the scripted deep click.

use std::time::Duration;

use deepclick_config::InteractionConfig;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use super::driver::{DriverError, ElementScript, PageDriver, PageScript};
use super::error::InteractionError;
use super::outcome::{
    InteractionOutcome, scripted_click_message, stale_element_message, truncate_markup,
};
use super::resolver;
use super::target::{ElementHandle, Locator};

/// Timing and size limits for one interaction.
#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub scroll_timeout: Duration,
    pub visibility_timeout: Duration,
    pub visibility_poll: Duration,
    pub native_click_timeout: Duration,
    pub outer_html_max_chars: usize,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self::from(&InteractionConfig::default())
    }
}

impl From<&InteractionConfig> for ExecutorSettings {
    fn from(config: &InteractionConfig) -> Self {
        Self {
            scroll_timeout: config.scroll_timeout(),
            visibility_timeout: config.visibility_timeout(),
            visibility_poll: config.visibility_poll(),
            native_click_timeout: config.native_click_timeout(),
            outer_html_max_chars: config.outer_html_max_chars,
        }
    }
}

/// What the in-page deep click reports back.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum DeepClickReport {
    NotFound,
    OptionSelected {
        #[serde(default)]
        value: String,
    },
    Clicked {
        #[serde(default)]
        submenu: bool,
    },
}

#[derive(Debug, Clone, Default)]
pub struct InteractionExecutor {
    settings: ExecutorSettings,
}

impl InteractionExecutor {
    pub fn new(settings: ExecutorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// Click the element matching `locator`. Never fails: every error becomes
    /// a failed outcome telling the caller to re-read the page.
    pub async fn click(
        &self,
        page: &dyn PageDriver,
        locator: &Locator,
        pre_delay: Duration,
    ) -> InteractionOutcome {
        info!("Clicking {} after waiting {:?}", locator, pre_delay);
        if !pre_delay.is_zero() {
            tokio::time::sleep(pre_delay).await;
        }

        match self.try_click(page, locator).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Unable to click element with selector: \"{}\". Error: {}", locator, e);
                InteractionOutcome::invalid_selector(locator, &e)
            }
        }
    }

    async fn try_click(
        &self,
        page: &dyn PageDriver,
        locator: &Locator,
    ) -> Result<InteractionOutcome, InteractionError> {
        let handle = resolver::resolve(page, locator)
            .await?
            .ok_or_else(|| InteractionError::NotFound(locator.clone()))?;
        debug!("{} is attached, scrolling into view", locator);

        if !self.scroll_into_view(page, &handle).await {
            debug!("Scroll into view failed for {}, continuing", locator);
        }
        if !self.wait_until_visible(page, &handle).await {
            debug!("{} did not become visible, clicking anyway", locator);
        }

        let tag = page
            .call_on_element(&handle, ElementScript::TagName, Vec::new())
            .await?
            .as_str()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let outer_html = page
            .call_on_element(&handle, ElementScript::OuterHtml, Vec::new())
            .await?;
        let outer_html = truncate_markup(
            outer_html.as_str().unwrap_or_default(),
            self.settings.outer_html_max_chars,
        );

        if tag == "option" {
            return self.select_option(page, handle, &outer_html).await;
        }
        drop(handle);

        self.scripted_click(page, locator, &outer_html).await
    }

    async fn select_option(
        &self,
        page: &dyn PageDriver,
        option: ElementHandle,
        outer_html: &str,
    ) -> Result<InteractionOutcome, InteractionError> {
        let value = page
            .call_on_element(&option, ElementScript::AttributeValue, vec![json!("value")])
            .await?;
        let value = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        let selected = page
            .call_on_element(&option, ElementScript::SelectInOwner, vec![json!(value)])
            .await?;
        if selected.as_bool() != Some(true) {
            return Err(InteractionError::Script(
                "option element has no owning select element".to_string(),
            ));
        }

        info!("Select menu option \"{}\" selected", value);
        Ok(InteractionOutcome::option_selected(&value, outer_html))
    }

    async fn scripted_click(
        &self,
        page: &dyn PageDriver,
        locator: &Locator,
        outer_html: &str,
    ) -> Result<InteractionOutcome, InteractionError> {
        debug!("Executing JavaScript click on element with selector: {}", locator);
        let raw = page
            .evaluate(PageScript::DeepClick, json!(locator.as_str()))
            .await?;
        let report: DeepClickReport = serde_json::from_value(raw.clone()).map_err(|e| {
            InteractionError::Script(format!("unexpected click report {}: {}", raw, e))
        })?;

        let outcome = match report {
            DeepClickReport::NotFound => {
                warn!("{} disappeared before the scripted click", locator);
                InteractionOutcome::clicked(stale_element_message(locator), outer_html, false)
            }
            DeepClickReport::OptionSelected { value } => InteractionOutcome::clicked(
                format!("Select menu option: {} selected", value),
                outer_html,
                true,
            ),
            DeepClickReport::Clicked { submenu } => {
                if submenu {
                    info!("Clicking {} opened a menu", locator);
                }
                InteractionOutcome::clicked(
                    scripted_click_message(locator, submenu),
                    outer_html,
                    true,
                )
            }
        };
        Ok(outcome)
    }

    /// Best effort. Returns whether the element was scrolled in time.
    pub(crate) async fn scroll_into_view(
        &self,
        page: &dyn PageDriver,
        element: &ElementHandle,
    ) -> bool {
        match tokio::time::timeout(self.settings.scroll_timeout, page.scroll_into_view(element))
            .await
        {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                debug!("Scroll into view failed: {}", e);
                false
            }
            Err(_) => {
                debug!("Scroll into view timed out after {:?}", self.settings.scroll_timeout);
                false
            }
        }
    }

    /// Best effort. Polls visibility until it holds or the timeout expires.
    pub(crate) async fn wait_until_visible(
        &self,
        page: &dyn PageDriver,
        element: &ElementHandle,
    ) -> bool {
        let poll = async {
            loop {
                match page
                    .call_on_element(element, ElementScript::IsVisible, Vec::new())
                    .await
                {
                    Ok(Value::Bool(true)) => return true,
                    Ok(_) => {}
                    Err(e) => {
                        debug!("Visibility check failed: {}", e);
                        return false;
                    }
                }
                tokio::time::sleep(self.settings.visibility_poll).await;
            }
        };
        tokio::time::timeout(self.settings.visibility_timeout, poll)
            .await
            .unwrap_or(false)
    }

    /// Direct input-level click with a short timeout, without re-resolution
    /// or menu detection. The main click flow always uses the scripted click.
    pub async fn native_click(
        &self,
        page: &dyn PageDriver,
        element: ElementHandle,
    ) -> Result<(), InteractionError> {
        debug!("Native click on node {}", element.node_id());
        tokio::time::timeout(self.settings.native_click_timeout, page.native_click(&element))
            .await
            .map_err(|_| {
                DriverError::Timeout(format!(
                    "native click did not complete within {:?}",
                    self.settings.native_click_timeout
                ))
            })??;
        Ok(())
    }
}

/// Seconds from the caller to a sleep duration. Negative, non-finite and
/// out-of-range values mean no delay.
pub fn pre_delay_from_secs(secs: f64) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
