//! Event types and payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bucket an event is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Interaction,
    Step,
    Tool,
    Assert,
    Run,
    Detection,
    Config,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interaction => "interaction",
            Self::Step => "step",
            Self::Tool => "tool",
            Self::Assert => "assert",
            Self::Run => "run",
            Self::Detection => "detection",
            Self::Config => "config",
        }
    }
}

/// Event payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub detail: Option<String>,
    pub additional_data: Option<Map<String, Value>>,
}

impl EventData {
    pub fn detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            additional_data: None,
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.additional_data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serialization() {
        assert_eq!(
            serde_json::to_string(&EventType::Interaction).unwrap(),
            "\"interaction\""
        );
        assert_eq!(serde_json::to_string(&EventType::Assert).unwrap(), "\"assert\"");
    }

    #[test]
    fn test_event_type_as_str_matches_serde() {
        for ty in [
            EventType::Interaction,
            EventType::Step,
            EventType::Tool,
            EventType::Assert,
            EventType::Run,
            EventType::Detection,
            EventType::Config,
        ] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json.trim_matches('"'), ty.as_str());
        }
    }

    #[test]
    fn test_event_data_detail() {
        let data = EventData::detail("click");
        assert_eq!(data.detail.as_deref(), Some("click"));
        assert!(data.additional_data.is_none());
    }

    #[test]
    fn test_event_data_with_data() {
        let data = EventData::detail("click").with_data("selector", "#go".into());
        let extra = data.additional_data.unwrap();
        assert_eq!(extra["selector"], "#go");
    }
}
