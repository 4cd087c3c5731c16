use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    visual::{VisualState, VisualStateTable, clear_night, sunny_day},
    weather::{WeatherCategory, WeatherObservation},
};

/// Local-hour window treated as daytime when sun times are unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConfig {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSelection {
    pub category: WeatherCategory,
    pub is_night: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateRequest {
    Observation(WeatherObservation),
    Manual(ManualSelection),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedState {
    pub state_key: String,
    pub category: WeatherCategory,
    pub is_night: bool,
    pub state: VisualState,
    /// Set when `state_key` was missing from the table and a default was used.
    pub fell_back: bool,
    pub observation: WeatherObservation,
}

#[must_use]
pub fn state_key(category: WeatherCategory, is_night: bool) -> String {
    match (category, is_night) {
        (WeatherCategory::Sunny, true) => "clear_night".to_string(),
        (WeatherCategory::Sunny, false) => "sunny_day".to_string(),
        (other, true) => format!("{}_night", other.as_str()),
        (other, false) => format!("{}_day", other.as_str()),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WeatherResolver<'a> {
    table: &'a VisualStateTable,
    time: TimeConfig,
}

impl WeatherResolver<'static> {
    pub fn builtin() -> Self {
        Self::new(VisualStateTable::builtin())
    }
}

impl<'a> WeatherResolver<'a> {
    pub fn new(table: &'a VisualStateTable) -> Self {
        Self {
            table,
            time: TimeConfig::default(),
        }
    }

    #[must_use]
    pub fn with_time_config(mut self, time: TimeConfig) -> Self {
        self.time = time;
        self
    }

    pub fn table(&self) -> &'a VisualStateTable {
        self.table
    }

    pub fn resolve_visual_state(&self, request: &StateRequest) -> ResolvedState {
        match request {
            StateRequest::Observation(observation) => self.resolve(observation),
            StateRequest::Manual(selection) => self.resolve_manual(*selection),
        }
    }

    pub fn resolve(&self, observation: &WeatherObservation) -> ResolvedState {
        self.resolve_at(observation, Utc::now(), Local::now().hour())
    }

    /// Resolution against an explicit clock. `local_hour` only matters when the
    /// observation lacks sunrise or sunset.
    pub fn resolve_at(
        &self,
        observation: &WeatherObservation,
        now: DateTime<Utc>,
        local_hour: u32,
    ) -> ResolvedState {
        let is_night = self.is_night(observation, now, local_hour);
        let category = observation.category();
        self.lookup(category, is_night, observation.clone())
    }

    pub fn resolve_manual(&self, selection: ManualSelection) -> ResolvedState {
        self.resolve_manual_at(selection, Utc::now())
    }

    pub fn resolve_manual_at(&self, selection: ManualSelection, now: DateTime<Utc>) -> ResolvedState {
        let observation = WeatherObservation::manual(selection.category, selection.is_night, now);
        self.lookup(selection.category, selection.is_night, observation)
    }

    #[must_use]
    pub fn is_night(&self, observation: &WeatherObservation, now: DateTime<Utc>, local_hour: u32) -> bool {
        match (observation.sunrise_utc, observation.sunset_utc) {
            (Some(sunrise), Some(sunset)) => {
                let ts = observation.timestamp_utc.unwrap_or_else(|| now.timestamp());
                ts < sunrise || ts >= sunset
            }
            _ => local_hour < self.time.day_start_hour || local_hour >= self.time.day_end_hour,
        }
    }

    fn lookup(
        &self,
        category: WeatherCategory,
        is_night: bool,
        observation: WeatherObservation,
    ) -> ResolvedState {
        let key = state_key(category, is_night);
        let (state, fell_back) = match self.table.get(&key) {
            Some(state) => (state.clone(), false),
            None => {
                log::warn!("visual state not found: {key}, using default");
                (self.fallback(is_night), true)
            }
        };
        ResolvedState {
            state_key: key,
            category,
            is_night,
            state,
            fell_back,
            observation,
        }
    }

    fn fallback(&self, is_night: bool) -> VisualState {
        let key = if is_night { "clear_night" } else { "sunny_day" };
        self.table.get(key).cloned().unwrap_or_else(|| {
            if is_night { clear_night() } else { sunny_day() }
        })
    }
}

#[cfg(test)]
mod tests;
