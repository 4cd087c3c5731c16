mod common;

use common::{night_weather_body, weather_body};
use weather_backdrop::{
    data::{
        geoip::{IpLocationProvider, LocationProvider, locate_or_default},
        weather::{OpenWeatherClient, WeatherSource, WeatherSourceError},
    },
    domain::weather::{Location, WeatherCategory},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn stockholm() -> Location {
    Location {
        name: "Stockholm".to_string(),
        latitude: 59.3293,
        longitude: 18.0686,
    }
}

#[tokio::test]
async fn current_weather_is_requested_in_metric_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "59.3293"))
        .and(query_param("lon", "18.0686"))
        .and(query_param("appid", "secret"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(weather_body(601), "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url(format!("{}/data/2.5/weather", server.uri()), "secret");
    let observation = client.current(&stockholm()).await.expect("observation");

    assert_eq!(observation.condition_code, 601);
    assert_eq!(observation.category(), WeatherCategory::Snow);
    assert_eq!(observation.details.temperature_c, Some(4.5));
    assert_eq!(observation.details.city_name.as_deref(), Some("Stockholm"));
    assert!(!observation.details.is_placeholder);
}

#[tokio::test]
async fn night_payload_keeps_sun_times() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(night_weather_body(800), "application/json"),
        )
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url(server.uri(), "secret");
    let observation = client.fetch(&stockholm()).await.expect("observation");
    assert!(observation.timestamp_utc > observation.sunset_utc);
}

#[tokio::test]
async fn http_errors_surface_their_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url(server.uri(), "bad-key");
    let err = client.fetch(&stockholm()).await.unwrap_err();
    assert!(matches!(err, WeatherSourceError::Status(401)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn garbage_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::with_base_url(server.uri(), "secret");
    let err = client.fetch(&stockholm()).await.unwrap_err();
    assert!(matches!(err, WeatherSourceError::Decode(_)));
}

#[tokio::test]
async fn ip_lookup_uses_the_reported_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"city": "Lisbon", "latitude": 38.7223, "longitude": -9.1393}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let provider = IpLocationProvider::with_url(format!("{}/json/", server.uri()));
    let location = provider.locate().await.expect("location");
    assert_eq!(location.name, "Lisbon");
    assert!((location.longitude + 9.1393).abs() < 1e-9);
}

#[tokio::test]
async fn failed_ip_lookup_falls_back_to_the_default_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"error": true}"#, "application/json"))
        .mount(&server)
        .await;

    let provider = IpLocationProvider::with_url(server.uri());
    assert!(provider.detect().await.is_err());
    assert_eq!(locate_or_default(&provider).await, Location::default());
}
