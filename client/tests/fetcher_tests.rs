//! Geocoder and series fetcher tests against a mock server

use bloom_client::{config::GeocoderConfig, ClientError, Geocoder, SeriesFetcher};
use shared::{Coordinate, DailyValue, DateRange, ParamId};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(server: &MockServer) -> Geocoder {
    Geocoder::new(&GeocoderConfig {
        base_url: format!("{}/", server.uri()),
        user_agent: "bloom-test/1.0".to_string(),
    })
    .unwrap()
}

fn origin() -> Coordinate {
    Coordinate::new(0.0, 0.0).unwrap()
}

// ============================================================================
// Geocoder
// ============================================================================

#[tokio::test]
async fn test_geocode_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Kyiv"))
        .and(header("user-agent", "bloom-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "50.4500336", "lon": "30.5241361" },
            { "lat": "1.0", "lon": "1.0" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let coordinate = geocoder(&server).geocode("  Kyiv ").await.unwrap();
    assert_eq!(coordinate.latitude(), 50.4500336);
    assert_eq!(coordinate.longitude(), 30.5241361);
}

#[tokio::test]
async fn test_geocode_numeric_degrees() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "lat": -33.9, "lon": 18.4 }])),
        )
        .mount(&server)
        .await;

    let coordinate = geocoder(&server).geocode("Cape Town").await.unwrap();
    assert_eq!(coordinate.latitude(), -33.9);
}

#[tokio::test]
async fn test_geocode_blank_name_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = geocoder(&server).geocode("   ").await;
    assert!(matches!(result, Err(ClientError::InvalidInput(_))));
}

#[tokio::test]
async fn test_geocode_empty_result_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let result = geocoder(&server).geocode("Atlantis").await;
    assert!(matches!(result, Err(ClientError::NotFound(name)) if name == "Atlantis"));
}

#[tokio::test]
async fn test_geocode_failures_are_network_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "busy"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "garbled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "lat": "north", "lon": "0" }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "beyond"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "lat": "91", "lon": "0" }])),
        )
        .mount(&server)
        .await;

    let geocoder = geocoder(&server);
    for name in ["busy", "garbled", "beyond"] {
        let result = geocoder.geocode(name).await;
        assert!(matches!(result, Err(ClientError::Network(_))), "{}: {:?}", name, result);
    }
}

// ============================================================================
// Series fetcher
// ============================================================================

#[tokio::test]
async fn test_fetch_daily_chronological() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch_ndvi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": { "parameter": { "NDVI": {
                "20240103": 0.3,
                "20240101": 0.1,
                "20240102": null
            } } }
        })))
        .mount(&server)
        .await;

    let fetcher = SeriesFetcher::new(&server.uri()).unwrap();
    let daily = fetcher
        .fetch_daily(origin(), &[ParamId::Ndvi], DateRange::default())
        .await
        .unwrap();

    assert_eq!(
        daily[&ParamId::Ndvi],
        vec![
            DailyValue::reading(0.1),
            DailyValue::missing(),
            DailyValue::reading(0.3)
        ]
    );
}

#[tokio::test]
async fn test_fetch_rejects_mixed_or_empty_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = SeriesFetcher::new(&server.uri()).unwrap();
    let mixed = fetcher
        .fetch_daily(origin(), &[ParamId::Ndvi, ParamId::T2m], DateRange::default())
        .await;
    let empty = fetcher.fetch_daily(origin(), &[], DateRange::default()).await;

    assert!(matches!(mixed, Err(ClientError::InvalidInput(_))));
    assert!(matches!(empty, Err(ClientError::InvalidInput(_))));
}

#[tokio::test]
async fn test_fetch_surfaces_relay_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch_climate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Invalid coordinates",
            "code": "INVALID_COORDINATES"
        })))
        .mount(&server)
        .await;

    let fetcher = SeriesFetcher::new(&server.uri()).unwrap();
    let result = fetcher
        .fetch_daily(origin(), &[ParamId::T2m], DateRange::default())
        .await;

    match result {
        Err(ClientError::Upstream(msg)) => assert!(msg.contains("Invalid coordinates")),
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_malformed_or_incomplete_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fetch_ndvi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fetch_climate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": { "parameter": { "T2M": { "20240101": 1.0 } } }
        })))
        .mount(&server)
        .await;

    let fetcher = SeriesFetcher::new(&server.uri()).unwrap();
    let malformed = fetcher
        .fetch_daily(origin(), &[ParamId::Ndvi], DateRange::default())
        .await;
    let incomplete = fetcher
        .fetch_daily(origin(), &[ParamId::T2m, ParamId::Ws10m], DateRange::default())
        .await;

    assert!(matches!(malformed, Err(ClientError::Upstream(_))));
    assert!(matches!(incomplete, Err(ClientError::Upstream(msg)) if msg.contains("WS10M")));
}

#[tokio::test]
async fn test_fetch_unreachable_relay_is_network_error() {
    let fetcher = SeriesFetcher::new("http://127.0.0.1:1").unwrap();
    let result = fetcher
        .fetch_daily(origin(), &[ParamId::Ndvi], DateRange::default())
        .await;
    assert!(matches!(result, Err(ClientError::Network(_))));
}
