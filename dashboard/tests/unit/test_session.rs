//! Session unit tests

use std::sync::Arc;
use std::time::Duration;

use shipit_dashboard::app::session::{Session, UiEvent};
use shipit_dashboard::config::settings::Settings;
use shipit_dashboard::controller::grid::GridController;
use shipit_dashboard::models::resource::ResourceCategory;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{create_test_records, FakeGateway};

fn create_session(gateway: &Arc<FakeGateway>) -> Session<FakeGateway> {
    Session::new(gateway.clone(), GridController::new())
}

#[tokio::test]
async fn test_session_start_loads_records() {
    let gateway = Arc::new(FakeGateway::with_releases(vec![Ok(create_test_records())]));
    let mut session = create_session(&gateway);

    session.start();
    assert!(session.view_model().loading);
    assert_eq!(session.in_flight(), 1);

    session.settle().await;

    let view = session.view_model();
    assert!(!view.loading);
    assert_eq!(view.visible_records.len(), 3);
    assert_eq!(session.in_flight(), 0);
    assert!(!session.next_completion().await);
}

#[tokio::test]
async fn test_session_retry_after_failed_load() {
    let gateway = Arc::new(FakeGateway::with_releases(vec![
        Err("backend down".to_string()),
        Ok(create_test_records()),
    ]));
    let mut session = create_session(&gateway);

    session.start();
    session.settle().await;
    assert_eq!(session.view_model().error.as_deref(), Some("backend down"));

    session.dispatch(UiEvent::RetryLoad);
    session.settle().await;

    let view = session.view_model();
    assert!(view.error.is_none());
    assert_eq!(view.visible_records.len(), 3);
    assert_eq!(gateway.release_calls(), 2);
}

#[tokio::test]
async fn test_session_query_and_selection_events() {
    let gateway = Arc::new(FakeGateway::with_releases(vec![Ok(create_test_records())]));
    let mut session = create_session(&gateway);
    session.start();
    session.settle().await;

    session.dispatch(UiEvent::QueryChanged("squad-x".to_string()));
    session.dispatch(UiEvent::CardSelected("hermes".to_string()));

    let view = session.view_model();
    assert_eq!(view.visible_records.len(), 1);
    assert_eq!(view.expanded_name(), Some("hermes"));

    session.dispatch(UiEvent::DetailClosed);
    assert!(session.view_model().expanded_record.is_none());
    assert_eq!(session.in_flight(), 0);
}

#[tokio::test]
async fn test_session_resources_of_previous_card_are_dropped() {
    let gateway = Arc::new(FakeGateway::with_releases(vec![Ok(create_test_records())]));
    let loki_gate = gateway.gate("loki");
    let mut session = create_session(&gateway);
    session.start();
    session.settle().await;

    session.dispatch(UiEvent::CardSelected("loki".to_string()));
    session.dispatch(UiEvent::ResourceToggled(ResourceCategory::Pods));
    session.dispatch(UiEvent::CardSelected("hermes".to_string()));
    session.dispatch(UiEvent::ResourceToggled(ResourceCategory::Pods));
    assert_eq!(session.in_flight(), 2);

    // hermes answers first; loki is still held
    assert!(session.next_completion().await);
    let detail = session.view_model().detail.unwrap();
    assert_eq!(detail.name, "hermes");
    assert_eq!(detail.pods.len(), 2);

    loki_gate.notify_one();
    session.settle().await;

    let detail = session.view_model().detail.unwrap();
    assert_eq!(detail.name, "hermes");
    assert!(detail.pods.iter().all(|r| r.name.starts_with("hermes")));
    assert_eq!(gateway.resource_calls(), 2);
}

#[tokio::test]
async fn test_session_failed_resources_surface_error() {
    let gateway = Arc::new(FakeGateway::with_releases(vec![Ok(create_test_records())]));
    gateway.set_resources("zeus", Err("forbidden".to_string()));
    let mut session = create_session(&gateway);
    session.start();
    session.settle().await;

    session.dispatch(UiEvent::CardSelected("zeus".to_string()));
    session.dispatch(UiEvent::ResourceToggled(ResourceCategory::Other));
    session.settle().await;

    let detail = session.view_model().detail.unwrap();
    assert!(!detail.resources_loading);
    assert_eq!(detail.resources_error.as_deref(), Some("forbidden"));
}

#[tokio::test]
async fn test_session_settles_when_fetch_task_panics() {
    let gateway = Arc::new(FakeGateway::with_releases(vec![Ok(create_test_records())]));
    gateway.crash_on("loki");
    let mut session = create_session(&gateway);
    session.start();
    session.settle().await;

    session.dispatch(UiEvent::CardSelected("loki".to_string()));
    session.dispatch(UiEvent::ResourceToggled(ResourceCategory::Pods));
    tokio::time::timeout(Duration::from_secs(5), session.settle())
        .await
        .expect("session settles after a crashed fetch");

    assert_eq!(session.in_flight(), 0);
    let detail = session.view_model().detail.unwrap();
    assert!(!detail.resources_loading);
    assert_eq!(detail.resources_error.as_deref(), Some("resource fetch aborted"));
}

#[tokio::test]
async fn test_session_refresh_request() {
    let gateway = Arc::new(FakeGateway::with_releases(vec![Ok(create_test_records())]));
    let mut session = create_session(&gateway);
    session.start();
    session.settle().await;

    session.dispatch(UiEvent::RecordRefreshRequested("ghost".to_string()));
    assert_eq!(session.in_flight(), 0);

    session.dispatch(UiEvent::RecordRefreshRequested("loki".to_string()));
    assert_eq!(session.in_flight(), 1);
    session.settle().await;
    assert!(session.controller().record("loki").is_some());
}

#[test]
fn test_session_from_settings() {
    let settings = Settings {
        cache_resources: true,
        ..Default::default()
    };
    let session = Session::from_settings(&settings).unwrap();
    assert!(session.controller().resource_cache().is_some());

    let session = Session::from_settings(&Settings::default()).unwrap();
    assert!(session.controller().resource_cache().is_none());
}

#[tokio::test]
async fn test_session_against_http_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "loki", "owner": {"team": "squad-cd"}, "status": "DEPLOYED"},
            {"name": "hermes", "owner": {"team": "squad-x"}, "status": "FAILED"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/releases/loki/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"kind": "Pod", "name": "loki-0"},
            {"kind": "Deployment", "name": "loki"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut settings = Settings::default();
    settings.api.base_url = format!("{}/api", mock_server.uri());
    let mut session = Session::from_settings(&settings).unwrap();

    session.start();
    session.settle().await;
    assert_eq!(session.view_model().visible_records.len(), 2);

    session.dispatch(UiEvent::CardSelected("loki".to_string()));
    session.dispatch(UiEvent::ResourceToggled(ResourceCategory::Pods));
    session.settle().await;
    session.dispatch(UiEvent::ResourceToggled(ResourceCategory::Other));
    assert_eq!(session.in_flight(), 0);

    let detail = session.view_model().detail.unwrap();
    assert_eq!(detail.pods.len(), 1);
    assert_eq!(detail.other_resources[0].kind, "Deployment");
}
