//! Integration tests for ForecastClient using wiremock.
//!
//! These tests verify the fetch–cache–render pipeline against a mock HTTP server.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use shoresquad::cache::{KeyValueStore, MemoryStore, FORECAST_CACHE_KEY};
use shoresquad::data::{FailureKind, ForecastClient, ForecastPayload};
use shoresquad::refresh::ForecastWidget;
use shoresquad::render::{render, DayEntry, ForecastView, RenderedEntry};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create the sample single-day response
fn sunny_response() -> serde_json::Value {
    serde_json::json!({
        "items": [{
            "forecasts": [{
                "date": "2024-05-01",
                "forecast": "Sunny",
                "temperature": {"low": 24, "high": 31},
                "wind": {"speed": {"low": 10, "high": 20}, "direction": "NE"},
                "relative_humidity": {"low": 60, "high": 85}
            }]
        }]
    })
}

fn cached_payload(summary: &str) -> ForecastPayload {
    serde_json::from_value(serde_json::json!({
        "forecasts": [{"date": "2024-04-30", "forecast": summary}]
    }))
    .unwrap()
}

fn client_for(server: &MockServer) -> ForecastClient<Arc<MemoryStore>> {
    ForecastClient::new(format!("{}/forecast", server.uri()), Arc::new(MemoryStore::new()))
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fresh_fetch_renders_expected_view() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 1).await;

    let client = client_for(&mock_server);
    let outcome = client.fetch_forecast().await;
    let view = render(&outcome);

    assert_eq!(view.summary, "Sunny • 24°C–31°C");
    assert_eq!(
        view.entries,
        vec![RenderedEntry::Day(DayEntry {
            label: "Wed, 1 May".to_string(),
            summary: "Sunny".to_string(),
            temperature: "24°C — 31°C".to_string(),
            wind: "10–20 km/h NE".to_string(),
            humidity: "60%–85%".to_string(),
        })]
    );
}

#[tokio::test]
async fn test_successful_fetch_writes_cache() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 1).await;

    let client = client_for(&mock_server);
    let before = Utc::now();
    let payload = client.fetch_forecast().await.unwrap();

    let entry = client.cache().read().expect("Cache should be written");
    assert_eq!(entry.data, payload);
    assert!(entry.timestamp >= before - Duration::seconds(1));
    assert_eq!(
        entry.data.forecasts[0].date,
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    );
}

#[tokio::test]
async fn test_fresh_cache_skips_network() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 0).await;

    let client = client_for(&mock_server);
    client.cache().write(&cached_payload("Cached haze")).unwrap();

    let payload = client.fetch_forecast().await.unwrap();

    assert_eq!(payload.forecasts[0].summary, "Cached haze");
}

#[tokio::test]
async fn test_stale_cache_fetches_exactly_once() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 1).await;

    let client = client_for(&mock_server);
    client
        .cache()
        .write_at(&cached_payload("Old"), Utc::now() - Duration::minutes(15))
        .unwrap();

    let payload = client.fetch_forecast().await.unwrap();

    assert_eq!(payload.forecasts[0].summary, "Sunny");
    assert_eq!(client.cache().read().unwrap().data.forecasts[0].summary, "Sunny");
}

#[tokio::test]
async fn test_second_fetch_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 1).await;

    let client = client_for(&mock_server);
    client.fetch_forecast().await.unwrap();
    client.fetch_forecast().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_cache_is_treated_as_miss() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 1).await;

    let client = client_for(&mock_server);
    client.cache().store().set(FORECAST_CACHE_KEY, "{{{").unwrap();

    assert!(client.fetch_forecast().await.is_ok());
}

#[tokio::test]
async fn test_empty_forecasts_is_invalid_shape_and_not_cached() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": [{"forecasts": []}]})),
        1,
    )
    .await;

    let client = client_for(&mock_server);
    let failure = client.fetch_forecast().await.unwrap_err();

    assert_eq!(failure.kind(), FailureKind::Shape);
    assert!(failure.to_string().starts_with("invalid shape"));
    assert!(client.cache().read().is_none());
}

#[tokio::test]
async fn test_missing_forecasts_is_invalid_shape_and_not_cached() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": [{}]})),
        1,
    )
    .await;

    let client = client_for(&mock_server);
    let failure = client.fetch_forecast().await.unwrap_err();

    assert_eq!(failure.kind(), FailureKind::Shape);
    assert!(client.cache().store().is_empty());
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(503), 1).await;

    let client = client_for(&mock_server);
    let failure = client.fetch_forecast().await.unwrap_err();

    assert_eq!(failure.kind(), FailureKind::Transport);
    assert_eq!(failure.status(), Some(503));
    assert!(client.cache().read().is_none());

    let view = render(&Err(failure));
    assert_eq!(view.summary, "Weather unavailable");
}

#[tokio::test]
async fn test_malformed_body_is_unexpected_failure() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        1,
    )
    .await;

    let client = client_for(&mock_server);
    let failure = client.fetch_forecast().await.unwrap_err();

    assert_eq!(failure.kind(), FailureKind::Unexpected);
    assert!(failure.to_string().starts_with("unexpected error"));
}

#[tokio::test]
async fn test_unreachable_server_is_unexpected_failure() {
    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let endpoint = format!("http://127.0.0.1:{}/forecast", port);

    let client = ForecastClient::new(endpoint, MemoryStore::new());
    let failure = client.fetch_forecast().await.unwrap_err();

    assert_eq!(failure.kind(), FailureKind::Unexpected);
}

#[derive(Default)]
struct RecordingView {
    summary: String,
    entries: Vec<RenderedEntry>,
    labels: Vec<String>,
}

impl ForecastView for RecordingView {
    fn set_summary(&mut self, text: &str) {
        self.summary = text.to_string();
    }

    fn set_entries(&mut self, entries: Vec<RenderedEntry>) {
        self.entries = entries;
    }

    fn set_refresh_label(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }
}

#[tokio::test]
async fn test_refresh_fetches_even_when_cache_is_fresh() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 1).await;

    let client = client_for(&mock_server);
    client.cache().write(&cached_payload("Cached haze")).unwrap();
    let widget = ForecastWidget::new(client, RecordingView::default())
        .with_ack_duration(std::time::Duration::from_millis(10));

    assert!(widget.refresh().await);

    let view = widget.view();
    assert_eq!(view.summary, "Sunny • 24°C–31°C");
    assert_eq!(view.labels, vec!["Refreshed", "Refresh"]);
}

#[tokio::test]
async fn test_load_uses_fresh_cache_without_network() {
    let mock_server = MockServer::start().await;
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(sunny_response()), 0).await;

    let client = client_for(&mock_server);
    client.cache().write(&cached_payload("Cached haze")).unwrap();
    let widget = ForecastWidget::new(client, RecordingView::default());

    assert!(widget.load().await);

    assert!(widget.view().summary.starts_with("Cached haze"));
}
