//! Integration tests for the GeoNames client using wiremock.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zipwx_core::{
    Credential, CredentialStore, DisplaySettings, Field, GeoNamesClient, Geocoder, Indicator,
    LookupController, LookupError, LookupOutcome, ObservationSource, Operator, Panel,
    ProviderError,
};

fn client(server: &MockServer) -> GeoNamesClient {
    GeoNamesClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn demo() -> Credential {
    Credential::new("demo").unwrap()
}

fn postal_codes_body() -> serde_json::Value {
    serde_json::json!({
        "postalCodes": [
            {
                "adminCode2": "061",
                "adminCode1": "NY",
                "adminName2": "New York",
                "lng": -73.99,
                "countryCode": "US",
                "postalCode": "10001",
                "adminName1": "New York",
                "placeName": "New York City",
                "lat": 40.75
            },
            {
                "adminCode1": "NY",
                "lng": -73.98,
                "postalCode": "10001",
                "placeName": "Second Candidate",
                "lat": 40.76
            }
        ]
    })
}

fn observation_body() -> serde_json::Value {
    serde_json::json!({
        "weatherObservation": {
            "elevation": 3,
            "lng": -73.88,
            "observation": "KLGA 171251Z 27010KT 10SM FEW250 20/13 A3012",
            "ICAO": "KLGA",
            "clouds": "few clouds",
            "dewPoint": "13",
            "cloudsCode": "FEW",
            "datetime": "2026-10-17 12:51:00",
            "countryCode": "US",
            "temperature": "20",
            "humidity": 64,
            "stationName": "New York, La Guardia Airport",
            "weatherCondition": "n/a",
            "windDirection": 270,
            "hectoPascAltimeter": 1020,
            "windSpeed": "10",
            "lat": 40.78
        }
    })
}

#[tokio::test]
async fn resolve_zip_returns_first_candidate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .and(query_param("postalcode", "10001"))
        .and(query_param("country", "US"))
        .and(query_param("username", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(postal_codes_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let location = client(&mock_server)
        .resolve_zip("10001", &demo())
        .await
        .unwrap()
        .expect("a candidate");

    assert_eq!(location.place_name, "New York City");
    assert_eq!(location.admin_code, "NY");
    assert_eq!(location.postal_code, "10001");
    assert_eq!(location.lat, 40.75);
    assert_eq!(location.lng, -73.99);
}

#[tokio::test]
async fn resolve_zip_empty_candidates_is_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "postalCodes": [] })),
        )
        .mount(&mock_server)
        .await;

    let location = client(&mock_server).resolve_zip("00000", &demo()).await.unwrap();

    assert!(location.is_none());
}

#[tokio::test]
async fn resolve_zip_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).resolve_zip("10001", &demo()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Malformed { .. }));
}

#[tokio::test]
async fn resolve_zip_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).resolve_zip("10001", &demo()).await.unwrap_err();

    match err {
        ProviderError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn service_error_object_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": {
                "message": "user account not enabled to use the free webservice",
                "value": 10
            }
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).resolve_zip("10001", &demo()).await.unwrap_err();

    match err {
        ProviderError::Service { message, code } => {
            assert_eq!(code, 10);
            assert!(message.contains("not enabled"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_observation_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findNearByWeatherJSON"))
        .and(query_param("lat", "40.75"))
        .and(query_param("lng", "-73.99"))
        .and(query_param("username", "demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(observation_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let obs = client(&mock_server)
        .fetch_observation(40.75, -73.99, &demo())
        .await
        .unwrap();

    assert_eq!(obs.temperature_c, 20.0);
    assert_eq!(obs.wind_speed_mph, 10.0);
    assert_eq!(obs.wind_direction_deg, 270.0);
    assert_eq!(obs.cloud_cover, "few clouds");
    assert_eq!(obs.humidity_pct, 64.0);
    assert_eq!(obs.dew_point_c, 13.0);
    assert_eq!(obs.observed_at_utc, "2026-10-17 12:51:00");
    assert_eq!(obs.station_name, "New York, La Guardia Airport");
}

#[tokio::test]
async fn fetch_observation_missing_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/findNearByWeatherJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_observation(40.75, -73.99, &demo())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NoObservation { .. }));
}

struct SilentOperator;

#[async_trait]
impl Operator for SilentOperator {
    async fn solicit_credential(&self) -> anyhow::Result<Option<String>> {
        Ok(Some("demo".to_string()))
    }

    async fn alert(&self, _message: &str) {}
}

fn controller_for(server: &MockServer) -> LookupController<Panel> {
    controller_with(client(server))
}

fn controller_with(client: GeoNamesClient) -> LookupController<Panel> {
    let geonames = Arc::new(client);
    LookupController::new(
        DisplaySettings::default(),
        Arc::new(CredentialStore::new()),
        geonames.clone(),
        geonames,
        Arc::new(SilentOperator),
        Panel::new(),
    )
}

#[tokio::test]
async fn lookup_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(postal_codes_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/findNearByWeatherJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(observation_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server);
    controller.set_zip_input("10001");

    let outcome = controller.request().await;

    assert!(matches!(outcome, LookupOutcome::Displayed { .. }));
    let panel = controller.surface();
    assert_eq!(
        panel.field(Field::Headline),
        Some("Current Weather for New York City, NY  10001")
    );
    assert_eq!(panel.field(Field::Temp), Some("68° F"));
    assert_eq!(panel.field(Field::WindSpeed), Some("10 mph"));
    assert_eq!(panel.field(Field::DewPoint), Some("55° F"));
    assert!(panel.is_shown(Indicator::Results));
    assert_eq!(controller.zip_input(), "");
}

#[tokio::test]
async fn unknown_zip_never_requests_weather() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "postalCodes": [] })),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/findNearByWeatherJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(observation_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&mock_server);
    controller.set_zip_input("00000");

    let outcome = controller.request().await;

    assert!(matches!(outcome, LookupOutcome::Failed(LookupError::InvalidZip(_))));
    assert_eq!(controller.zip_input(), "00000");
    assert!(!controller.surface().is_shown(Indicator::Spinner));
}

#[tokio::test]
async fn slow_response_times_out_as_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(postal_codes_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = GeoNamesClient::new(&mock_server.uri(), Duration::from_secs(1)).unwrap();
    let err = client.resolve_zip("10001", &demo()).await.unwrap_err();

    match err {
        ProviderError::Network(source) => assert!(source.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn timed_out_lookup_fails_and_keeps_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(postal_codes_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/findNearByWeatherJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(observation_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut controller = controller_with(
        GeoNamesClient::new(&mock_server.uri(), Duration::from_secs(1)).unwrap(),
    );
    controller.set_zip_input("10001");

    let outcome = controller.request().await;

    assert!(matches!(
        outcome,
        LookupOutcome::Failed(LookupError::Provider(ProviderError::Network(_)))
    ));
    assert_eq!(controller.zip_input(), "10001");
    assert!(!controller.surface().is_shown(Indicator::Spinner));
    assert!(!controller.surface().is_shown(Indicator::Results));
    assert!(controller.surface().field(Field::Temp).is_none());
}

#[tokio::test]
async fn bad_later_candidate_does_not_spoil_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "postalCodes": [
                {
                    "adminCode1": "NY",
                    "postalCode": "10001",
                    "placeName": "New York City",
                    "lat": 40.75,
                    "lng": -73.99
                },
                {
                    "adminCode1": "NY",
                    "postalCode": "10001",
                    "lat": 40.76,
                    "lng": -73.98
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let location = client(&mock_server)
        .resolve_zip("10001", &demo())
        .await
        .unwrap()
        .expect("a candidate");

    assert_eq!(location.place_name, "New York City");
}

#[tokio::test]
async fn bad_first_candidate_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postalCodeSearchJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "postalCodes": [
                { "adminCode1": "NY", "postalCode": "10001", "lat": 40.75, "lng": -73.99 }
            ]
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).resolve_zip("10001", &demo()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Malformed { .. }));
}
