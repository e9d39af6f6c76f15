use super::*;

#[test]
fn test_scripted_click_message_plain() {
    let locator = Locator::new("[mmid='42']");
    assert_eq!(
        scripted_click_message(&locator, false),
        "Executed JavaScript Click on element with selector: [mmid='42']"
    );
}

#[test]
fn test_scripted_click_message_with_submenu_notice() {
    let locator = Locator::new("#menu");
    let message = scripted_click_message(&locator, true);
    assert!(message.starts_with("Executed JavaScript Click on element with selector: #menu. Very important"));
    assert!(message.ends_with("Get all_fields DOM to complete the action."));
}

#[test]
fn test_clicked_detail_appends_markup() {
    let outcome = InteractionOutcome::clicked("Clicked".to_string(), "<a>x</a>", true);
    assert_eq!(outcome.detail, "Clicked The clicked element's outer HTML is: <a>x</a>.");
    assert!(outcome.succeeded);
}

#[test]
fn test_option_selected_messages() {
    let outcome = InteractionOutcome::option_selected("blue", "<select></select>");
    assert_eq!(outcome.summary, "Select menu option \"blue\" selected");
    assert_eq!(
        outcome.detail,
        "Select menu option \"blue\" selected. The select element's outer HTML is: <select></select>."
    );
    assert!(outcome.succeeded);
}

#[test]
fn test_invalid_selector_messages() {
    let outcome = InteractionOutcome::invalid_selector(&Locator::new("#gone"), &"boom");
    assert_eq!(
        outcome.summary,
        "Unable to click element with selector: \"#gone\" since the selector is invalid. Proceed by retrieving DOM again."
    );
    assert!(outcome.detail.ends_with("Proceed by retrieving DOM again.. Error: boom"));
    assert!(!outcome.succeeded);
}

#[test]
fn test_report_message_without_changes_is_detail() {
    let report = ClickReport {
        locator: Locator::new("#go"),
        outcome: InteractionOutcome::success("summary", "detail text"),
        changes: None,
    };
    assert_eq!(report.message(), "detail text");
    assert!(report.succeeded());
}

#[test]
fn test_report_message_with_changes() {
    let report = ClickReport {
        locator: Locator::new("#go"),
        outcome: InteractionOutcome::success("Clicked #go", "detail text"),
        changes: Some("[{\"tag\":\"li\"}]".to_string()),
    };
    let message = report.message();
    assert!(message.starts_with("Success: Clicked #go.\n As a consequence of this action"));
    assert!(message.contains("new elements have appeared in view: [{\"tag\":\"li\"}]"));
    assert!(message.contains("the action to click #go is not yet executed"));
    assert!(!message.contains("detail text"));
}

#[test]
fn test_truncate_markup() {
    assert_eq!(truncate_markup("<b>hi</b>", 100), "<b>hi</b>");
    assert_eq!(truncate_markup("<b>hi</b>", 3), "<b>...");
    assert_eq!(truncate_markup("ééé", 2), "éé...");
    assert_eq!(truncate_markup("abc", 3), "abc");
}
