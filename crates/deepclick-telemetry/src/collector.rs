//! Event collector.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use deepclick_config::TelemetryConfig;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::event::{EventData, EventType};
use crate::installation::load_or_create_installation_id;

/// Sink for interaction events. Recording never fails from the caller's view.
pub trait EventRecorder: Send + Sync {
    fn record_event(&self, event_type: EventType, data: EventData);
}

#[derive(Debug, Clone, Serialize)]
struct RecordedEvent {
    timestamp: String,
    data: EventData,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Bucket {
    events: Vec<RecordedEvent>,
    event_count: usize,
}

/// In-memory collector filing events into per-type buckets.
pub struct EventCollector {
    enabled: bool,
    installation_id: String,
    session_start: DateTime<Local>,
    buckets: Mutex<BTreeMap<&'static str, Bucket>>,
}

impl EventCollector {
    /// Create a collector with an explicit installation id.
    pub fn new(enabled: bool, installation_id: impl Into<String>) -> Self {
        Self {
            enabled,
            installation_id: installation_id.into(),
            session_start: Local::now(),
            buckets: Mutex::new(BTreeMap::new()),
        }
    }

    /// Create a collector from configuration.
    ///
    /// An unreadable id file does not disable collection; a throwaway id is
    /// used for this session instead.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        if !config.enabled {
            return Self::new(false, String::new());
        }
        let installation_id = match load_or_create_installation_id(&config.installation_id_file)
        {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    "Failed to load installation id from {:?}: {}",
                    config.installation_id_file, e
                );
                Uuid::new_v4().to_string()
            }
        };
        Self::new(true, installation_id)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn installation_id(&self) -> &str {
        &self.installation_id
    }

    /// Number of events recorded under `event_type`.
    pub fn event_count(&self, event_type: EventType) -> usize {
        self.buckets
            .lock()
            .get(event_type.as_str())
            .map(|b| b.event_count)
            .unwrap_or(0)
    }

    /// Build the session summary: installation id, session start and buckets.
    pub fn build_final_message(&self) -> Value {
        let buckets = self.buckets.lock();
        json!({
            "installation_id": self.installation_id,
            "session_start": self.session_start.to_rfc3339(),
            "buckets": &*buckets,
        })
    }
}

impl EventRecorder for EventCollector {
    fn record_event(&self, event_type: EventType, data: EventData) {
        if !self.enabled {
            return;
        }
        debug!("Telemetry event {}: {:?}", event_type.as_str(), data.detail);
        let event = RecordedEvent {
            timestamp: Local::now().to_rfc3339(),
            data,
        };
        let mut buckets = self.buckets.lock();
        let bucket = buckets.entry(event_type.as_str()).or_default();
        bucket.events.push(event);
        bucket.event_count += 1;
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
