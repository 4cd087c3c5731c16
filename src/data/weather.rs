use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::weather::{Location, ObservationDetails, WeatherObservation};

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Error)]
pub enum WeatherSourceError {
    #[error("weather request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("weather service returned HTTP {0}")]
    Status(u16),
    #[error("weather payload could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("weather payload has no condition entry")]
    MissingCondition,
}

/// Supplies the current observation for a location.
pub trait WeatherSource {
    fn current(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherSourceError>> + Send;
}

/// OpenWeatherMap "current weather" endpoint, metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(CURRENT_WEATHER_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn fetch(&self, location: &Location) -> Result<WeatherObservation, WeatherSourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(WeatherSourceError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherSourceError::Status(status.as_u16()));
        }

        let payload: CurrentWeatherResponse =
            response.json().await.map_err(WeatherSourceError::Decode)?;
        observation_from_payload(payload)
    }
}

impl WeatherSource for OpenWeatherClient {
    fn current(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherSourceError>> + Send {
        self.fetch(location)
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    #[serde(default)]
    weather: Vec<ConditionEntry>,
    dt: Option<i64>,
    #[serde(default)]
    sys: SunBlock,
    #[serde(default)]
    main: MainBlock,
    #[serde(default)]
    wind: WindBlock,
    #[serde(default)]
    clouds: CloudBlock,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    id: u16,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct SunBlock {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct MainBlock {
    temp: Option<f32>,
    humidity: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    speed: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct CloudBlock {
    all: Option<f32>,
}

pub fn observation_from_payload(
    payload: CurrentWeatherResponse,
) -> Result<WeatherObservation, WeatherSourceError> {
    let condition = payload
        .weather
        .into_iter()
        .next()
        .ok_or(WeatherSourceError::MissingCondition)?;
    Ok(WeatherObservation {
        condition_code: condition.id,
        timestamp_utc: payload.dt,
        sunrise_utc: payload.sys.sunrise,
        sunset_utc: payload.sys.sunset,
        details: ObservationDetails {
            description: condition.description,
            temperature_c: payload.main.temp,
            humidity: payload.main.humidity,
            wind_speed: payload.wind.speed,
            cloud_cover: payload.clouds.all,
            city_name: payload.name.filter(|name| !name.is_empty()),
            is_placeholder: false,
        },
    })
}
