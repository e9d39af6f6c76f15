//! Integration tests against a real Chrome.
//!
//! These tests require Chrome to be installed on the system.
//! Run with: cargo test -p deepclick-tools-browser --test integration_test -- --ignored --nocapture

use std::sync::Arc;
use std::time::Duration;

use deepclick_config::InteractionConfig;
use deepclick_telemetry::EventCollector;
use deepclick_tools_browser::manager::{BrowserManager, BrowserManagerConfig};
use deepclick_tools_browser::ClickSkill;

/// Page with a light-DOM button, a button in nested open shadow roots, one
/// in a closed shadow root, a same-origin srcdoc frame and a select.
const FIXTURE: &str = r#"
    document.body.innerHTML = `
        <button mmid="1" onclick="this.textContent='clicked'">plain</button>
        <div id="outer"></div>
        <div id="closed"></div>
        <iframe srcdoc="<button mmid='3' onclick=&quot;document.body.append(Object.assign(document.createElement('p'), {textContent: 'framed'}))&quot;>in frame</button>"></iframe>
        <select id="colors"><option value="red">Red</option><option mmid="5" value="blue">Blue</option></select>
    `;
    const outer = document.getElementById('outer').attachShadow({ mode: 'open' });
    outer.innerHTML = '<div id="inner"></div>';
    const inner = outer.getElementById('inner').attachShadow({ mode: 'open' });
    inner.innerHTML = `<button mmid="2" aria-expanded="false"
        onclick="this.setAttribute('aria-expanded', 'true')">menu</button>`;
    document.getElementById('closed').attachShadow({ mode: 'closed' }).innerHTML =
        '<button mmid="4">hidden</button>';
    true
"#;

fn test_config() -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: 9333,
        profile_dir: Some(std::env::temp_dir().join("deepclick-test-profile")),
        headless: true,
        ..BrowserManagerConfig::default()
    }
}

async fn setup() -> (Arc<BrowserManager>, ClickSkill) {
    let manager = Arc::new(BrowserManager::new(test_config()));
    manager.new_page("about:blank").await.unwrap();
    let session = manager.current_session().await.unwrap();
    session.evaluate(FIXTURE).await.unwrap();
    // srcdoc frames load asynchronously
    tokio::time::sleep(Duration::from_millis(500)).await;

    let skill = ClickSkill::new(
        manager.clone(),
        Arc::new(EventCollector::new(false, "integration")),
        &InteractionConfig::default(),
    );
    (manager, skill)
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_chrome_detection() {
    let chrome_path = BrowserManager::find_chrome();
    assert!(chrome_path.is_some(), "Chrome should be installed on the system");
    assert!(chrome_path.unwrap().exists());
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_click_light_dom_button() {
    let (manager, skill) = setup().await;

    let report = skill.click("[mmid='1']", 0.0).await.unwrap();
    assert!(report.succeeded(), "{}", report.message());
    assert!(report.message().contains("<button mmid=\"1\""));

    manager.shutdown_chrome().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_click_nested_shadow_button_reports_menu() {
    let (manager, skill) = setup().await;

    let report = skill.click("[mmid='2']", 0.0).await.unwrap();
    assert!(report.succeeded(), "{}", report.message());
    assert!(report.outcome.summary.contains("a menu has appeared"));

    manager.shutdown_chrome().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_click_in_frame_reports_new_content() {
    let (manager, skill) = setup().await;

    let report = skill.click("[mmid='3']", 0.0).await.unwrap();
    assert!(report.succeeded(), "{}", report.message());
    let changes = report.changes.as_deref().unwrap_or_default();
    assert!(changes.contains("framed"), "changes: {}", changes);

    manager.shutdown_chrome().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_select_option() {
    let (manager, skill) = setup().await;

    let report = skill.click("[mmid='5']", 0.0).await.unwrap();
    assert!(report.succeeded(), "{}", report.message());
    assert!(report.outcome.summary.starts_with("Select menu option \"blue\" selected"));

    let session = manager.current_session().await.unwrap();
    let value = session
        .evaluate("document.getElementById('colors').value")
        .await
        .unwrap();
    assert_eq!(value, "blue");

    manager.shutdown_chrome().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_closed_shadow_root_is_not_searched() {
    let (manager, skill) = setup().await;

    assert!(!skill.element_exists("[mmid='4']").await.unwrap());
    let report = skill.click("[mmid='4']", 0.0).await.unwrap();
    assert!(!report.succeeded());

    manager.shutdown_chrome().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_element_exists_across_boundaries() {
    let (manager, skill) = setup().await;

    for selector in ["[mmid='1']", "[mmid='2']", "[mmid='3']", "[mmid='5']"] {
        assert!(skill.element_exists(selector).await.unwrap(), "{}", selector);
    }
    assert!(!skill.element_exists("[mmid='99']").await.unwrap());

    manager.shutdown_chrome().await.unwrap();
}
