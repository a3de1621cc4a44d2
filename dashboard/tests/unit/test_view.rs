//! View model unit tests

use chrono::{Duration, Utc};

use shipit_dashboard::controller::grid::GridController;
use shipit_dashboard::models::status::{StatusColor, StatusIcon};

use crate::common::create_test_records;

fn loaded_controller() -> GridController {
    let mut controller = GridController::new();
    let ticket = controller.begin_load();
    controller.apply_load(ticket, Ok(create_test_records()));
    controller
}

#[test]
fn test_idle_view() {
    let view = GridController::new().view_model();
    assert!(!view.loading);
    assert!(view.error.is_none());
    assert!(view.visible_records.is_empty());
    assert!(view.detail.is_none());
    assert!(view.last_loaded_at.is_none());
}

#[test]
fn test_cards_carry_status_chips() {
    let view = loaded_controller().view_model();
    let cards = view.cards();

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].chip.label, "Deployed");
    assert_eq!(cards[0].chip.icon, StatusIcon::Done);
    assert_eq!(cards[1].chip.color, StatusColor::Danger);
    assert_eq!(cards[2].chip.label, "Upgrading");
    assert_eq!(cards[2].chip.icon, StatusIcon::Pending);
}

#[test]
fn test_only_expanded_card_is_marked() {
    let mut controller = loaded_controller();
    controller.select_card("hermes");

    let view = controller.view_model();
    let expanded: Vec<_> = view
        .cards()
        .iter()
        .filter(|c| c.expanded)
        .map(|c| c.record.name.clone())
        .collect();
    assert_eq!(expanded, vec!["hermes"]);
    assert!(view.last_loaded_at.is_some());
}

#[test]
fn test_card_deployed_ago() {
    let now = Utc::now();
    let mut records = create_test_records();
    records[0].last_deployed_at = Some(now - Duration::minutes(5));

    let mut controller = GridController::new();
    let ticket = controller.begin_load();
    controller.apply_load(ticket, Ok(records));

    let view = controller.view_model();
    let cards = view.cards();
    assert_eq!(cards[0].deployed_ago(now).as_deref(), Some("5 min ago"));
    assert!(cards[1].deployed_ago(now).is_none());
}

#[test]
fn test_view_serializes_for_renderer() {
    let mut controller = loaded_controller();
    controller.select_card("loki");

    let json = serde_json::to_value(controller.view_model()).unwrap();
    assert_eq!(json["expanded_record"]["name"], "loki");
    assert_eq!(json["detail"]["pods_visible"], false);
    assert_eq!(json["total_records"], 3);
}
