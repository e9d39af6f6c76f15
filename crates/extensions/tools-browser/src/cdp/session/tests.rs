use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use super::core::PageSession;
use super::mutations::{binding_payload, pump_mutations};
use crate::cdp::protocol::CdpResponse;
use crate::interaction::{MutationCapture, MutationFeed};
use crate::mutation::{MUTATION_BINDING, MutationHub};

fn binding_event(name: &str, payload: &str) -> CdpResponse {
    serde_json::from_value(json!({
        "method": "Runtime.bindingCalled",
        "params": {"name": name, "payload": payload, "executionContextId": 1},
        "sessionId": "S1"
    }))
    .unwrap()
}

#[test]
fn test_quad_center() {
    let quad = vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    assert_eq!(PageSession::quad_center(&quad), (50.0, 50.0));
}

#[test]
fn test_quad_center_short_quad() {
    assert_eq!(PageSession::quad_center(&[1.0, 2.0]), (0.0, 0.0));
}

#[test]
fn test_value_or_exception_returns_value() {
    let result = json!({"result": {"type": "boolean", "value": true}});
    assert_eq!(PageSession::value_or_exception(result).unwrap(), json!(true));
}

#[test]
fn test_value_or_exception_prefers_description() {
    let result = json!({
        "result": {"type": "object"},
        "exceptionDetails": {
            "text": "Uncaught",
            "exception": {"type": "object", "description": "SyntaxError: '[[' is not a valid selector"}
        }
    });
    let err = PageSession::value_or_exception(result).unwrap_err();
    assert_eq!(
        err.to_string(),
        "JavaScript error: SyntaxError: '[[' is not a valid selector"
    );
}

#[test]
fn test_binding_payload_filters_events() {
    assert_eq!(
        binding_payload(&binding_event(MUTATION_BINDING, "[{\"tag\":\"li\"}]")).as_deref(),
        Some("[{\"tag\":\"li\"}]")
    );
    assert!(binding_payload(&binding_event("otherBinding", "x")).is_none());
    assert!(binding_payload(&binding_event(MUTATION_BINDING, "")).is_none());

    let load: CdpResponse =
        serde_json::from_value(json!({"method": "Page.loadEventFired", "params": {}})).unwrap();
    assert!(binding_payload(&load).is_none());
}

#[tokio::test]
async fn test_pump_forwards_to_hub_until_channel_closes() {
    let hub = Arc::new(MutationHub::new());
    let capture = Arc::new(MutationCapture::default());
    hub.subscribe(capture.clone());

    let (tx, rx) = mpsc::unbounded_channel();
    let pump = tokio::spawn(pump_mutations(rx, hub.clone()));

    tx.send(binding_event(MUTATION_BINDING, "first")).unwrap();
    tx.send(binding_event("otherBinding", "ignored")).unwrap();
    tx.send(binding_event(MUTATION_BINDING, "second")).unwrap();
    drop(tx);
    pump.await.unwrap();

    assert_eq!(capture.take().as_deref(), Some("second"));
}
