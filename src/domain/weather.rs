use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod conditions;

pub use conditions::{category_for_code, code_for_category};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    Sunny,
    Cloudy,
    Rain,
    Storm,
    Snow,
    Fog,
}

impl WeatherCategory {
    pub const ALL: [WeatherCategory; 6] = [
        WeatherCategory::Sunny,
        WeatherCategory::Cloudy,
        WeatherCategory::Rain,
        WeatherCategory::Storm,
        WeatherCategory::Snow,
        WeatherCategory::Fog,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rain => "rain",
            WeatherCategory::Storm => "storm",
            WeatherCategory::Snow => "snow",
            WeatherCategory::Fog => "fog",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            name: "San Francisco".to_string(),
            latitude: 37.7749,
            longitude: -122.4194,
        }
    }
}

/// Display-only fields carried alongside an observation. Resolution never reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationDetails {
    pub description: String,
    pub temperature_c: Option<f32>,
    pub humidity: Option<f32>,
    pub wind_speed: Option<f32>,
    pub cloud_cover: Option<f32>,
    pub city_name: Option<String>,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub condition_code: u16,
    pub timestamp_utc: Option<i64>,
    pub sunrise_utc: Option<i64>,
    pub sunset_utc: Option<i64>,
    pub details: ObservationDetails,
}

const CLEAR_SKY_CODE: u16 = 800;
const MANUAL_SUN_OFFSET_SECS: i64 = 3600;
const MANUAL_NIGHT_SUNSET_OFFSET_SECS: i64 = 100;

impl WeatherObservation {
    /// Stand-in used before the first successful fetch and after a failed one.
    ///
    /// Sun times bracket `now` by an hour, so the placeholder is always a
    /// clear day.
    pub fn placeholder(city_name: &str, now: DateTime<Utc>) -> Self {
        let ts = now.timestamp();
        Self {
            condition_code: CLEAR_SKY_CODE,
            timestamp_utc: Some(ts),
            sunrise_utc: Some(ts - MANUAL_SUN_OFFSET_SECS),
            sunset_utc: Some(ts + MANUAL_SUN_OFFSET_SECS),
            details: ObservationDetails {
                description: "clear sky".to_string(),
                temperature_c: Some(22.0),
                humidity: Some(60.0),
                wind_speed: Some(3.5),
                cloud_cover: Some(0.0),
                city_name: Some(city_name.to_string()),
                is_placeholder: true,
            },
        }
    }

    /// Synthetic observation for a manual selection. Sun times are pinned around
    /// `now` so the day/night test lands on the requested side.
    pub fn manual(category: WeatherCategory, is_night: bool, now: DateTime<Utc>) -> Self {
        let ts = now.timestamp();
        let sunset_offset = if is_night {
            -MANUAL_NIGHT_SUNSET_OFFSET_SECS
        } else {
            MANUAL_SUN_OFFSET_SECS
        };
        Self {
            condition_code: code_for_category(category),
            timestamp_utc: Some(ts),
            sunrise_utc: Some(ts - MANUAL_SUN_OFFSET_SECS),
            sunset_utc: Some(ts + sunset_offset),
            details: ObservationDetails {
                description: category.as_str().to_string(),
                temperature_c: Some(20.0),
                humidity: Some(60.0),
                wind_speed: Some(3.0),
                cloud_cover: Some(50.0),
                city_name: Some("Manual Mode".to_string()),
                is_placeholder: false,
            },
        }
    }

    #[must_use]
    pub fn category(&self) -> WeatherCategory {
        category_for_code(self.condition_code)
    }
}
