use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_record_event_fills_bucket() {
    let collector = EventCollector::new(true, "install-1");
    collector.record_event(EventType::Interaction, EventData::detail("click"));
    collector.record_event(EventType::Interaction, EventData::detail("click"));
    collector.record_event(EventType::Tool, EventData::detail("browser_click"));

    assert_eq!(collector.event_count(EventType::Interaction), 2);
    assert_eq!(collector.event_count(EventType::Tool), 1);
    assert_eq!(collector.event_count(EventType::Run), 0);
}

#[test]
fn test_disabled_collector_drops_events() {
    let collector = EventCollector::new(false, "install-1");
    collector.record_event(EventType::Interaction, EventData::detail("click"));

    assert!(!collector.is_enabled());
    assert_eq!(collector.event_count(EventType::Interaction), 0);
}

#[test]
fn test_build_final_message_shape() {
    let collector = EventCollector::new(true, "install-42");
    collector.record_event(EventType::Interaction, EventData::detail("click"));

    let message = collector.build_final_message();
    assert_eq!(message["installation_id"], "install-42");
    assert!(message["session_start"].is_string());

    let bucket = &message["buckets"]["interaction"];
    assert_eq!(bucket["event_count"], 1);
    assert_eq!(bucket["events"][0]["data"]["detail"], "click");
    assert!(bucket["events"][0]["timestamp"].is_string());
}

#[test]
fn test_build_final_message_without_events() {
    let collector = EventCollector::new(true, "install-1");
    let message = collector.build_final_message();
    assert!(message["buckets"].as_object().unwrap().is_empty());
}

#[test]
fn test_from_config_creates_installation_id() {
    let dir = TempDir::new().unwrap();
    let config = TelemetryConfig {
        enabled: true,
        installation_id_file: dir.path().join("installation_id.txt"),
    };

    let collector = EventCollector::from_config(&config);
    assert!(collector.is_enabled());
    assert!(Uuid::parse_str(collector.installation_id()).is_ok());

    let again = EventCollector::from_config(&config);
    assert_eq!(again.installation_id(), collector.installation_id());
}

#[test]
fn test_from_config_disabled_skips_id_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("installation_id.txt");
    let config = TelemetryConfig {
        enabled: false,
        installation_id_file: path.clone(),
    };

    let collector = EventCollector::from_config(&config);
    assert!(!collector.is_enabled());
    assert!(!path.exists());
}

#[test]
fn test_from_config_unreadable_id_falls_back() {
    let dir = TempDir::new().unwrap();
    let path: PathBuf = dir.path().join("installation_id.txt");
    std::fs::write(&path, "").unwrap();
    let config = TelemetryConfig {
        enabled: true,
        installation_id_file: path,
    };

    let collector = EventCollector::from_config(&config);
    assert!(collector.is_enabled());
    assert!(Uuid::parse_str(collector.installation_id()).is_ok());
}
