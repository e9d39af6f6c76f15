//! Top-level click and presence entry points.

use std::sync::Arc;
use std::time::Duration;

use deepclick_config::InteractionConfig;
use deepclick_telemetry::{EventData, EventRecorder, EventType};
use tracing::info;

use super::error::InteractionError;
use super::executor::{ExecutorSettings, InteractionExecutor, pre_delay_from_secs};
use super::outcome::ClickReport;
use super::presence;
use super::session::{BrowserSession, MessageType};
use super::target::Locator;
use super::watcher::MutationWatcher;

pub struct ClickSkill {
    session: Arc<dyn BrowserSession>,
    telemetry: Arc<dyn EventRecorder>,
    executor: InteractionExecutor,
    settle_window: Duration,
}

impl ClickSkill {
    pub fn new(
        session: Arc<dyn BrowserSession>,
        telemetry: Arc<dyn EventRecorder>,
        config: &InteractionConfig,
    ) -> Self {
        Self {
            session,
            telemetry,
            executor: InteractionExecutor::new(ExecutorSettings::from(config)),
            settle_window: config.settle_window(),
        }
    }

    pub fn executor(&self) -> &InteractionExecutor {
        &self.executor
    }

    /// Click `selector` on the current page.
    ///
    /// Only a missing page is an error; every other failure is reported in
    /// the returned message.
    pub async fn click(
        &self,
        selector: &str,
        wait_before_execution: f64,
    ) -> Result<ClickReport, InteractionError> {
        info!("Executing ClickElement with \"{}\" as the selector", selector);
        self.telemetry
            .record_event(EventType::Interaction, EventData::detail("click"));

        let page = self
            .session
            .current_page()
            .await
            .ok_or(InteractionError::NoActivePage)?;
        let locator = Locator::new(selector);
        let pre_delay = pre_delay_from_secs(wait_before_execution);

        self.session.take_screenshot("click_start", page.as_ref()).await;

        let watcher = MutationWatcher::new(self.session.mutation_feed(), self.settle_window);
        let observed = watcher
            .observe(async {
                self.session.highlight_element(&locator, true).await;
                self.executor.click(page.as_ref(), &locator, pre_delay).await
            })
            .await;

        self.session.take_screenshot("click_end", page.as_ref()).await;
        self.session
            .notify_user(&observed.result.summary, MessageType::Action)
            .await;

        Ok(ClickReport {
            locator,
            outcome: observed.result,
            changes: observed.mutation,
        })
    }

    /// Whether `selector` matches anything on the current page, including
    /// inside shadow roots and same-origin frames.
    pub async fn element_exists(&self, selector: &str) -> Result<bool, InteractionError> {
        let page = self
            .session
            .current_page()
            .await
            .ok_or(InteractionError::NoActivePage)?;
        Ok(presence::exists(page.as_ref(), &Locator::new(selector)).await?)
    }
}

#[cfg(test)]
#[path = "skill_tests.rs"]
mod tests;
