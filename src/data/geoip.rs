use std::{future::Future, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::Location;

const IPAPI_URL: &str = "https://ipapi.co/json/";

/// Resolves where the weather should be fetched for.
pub trait LocationProvider {
    fn locate(&self) -> impl Future<Output = Result<Location>> + Send;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    city: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    client: Client,
    url: String,
}

impl Default for IpLocationProvider {
    fn default() -> Self {
        Self::with_url(IPAPI_URL)
    }
}

impl IpLocationProvider {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| Client::new()),
            url: url.into(),
        }
    }

    pub async fn detect(&self) -> Result<Location> {
        let response: IpApiResponse = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("IP geolocation request failed")?
            .error_for_status()
            .context("IP geolocation returned non-success status")?
            .json()
            .await
            .context("failed to parse IP geolocation payload")?;
        let latitude = response.latitude.context("IP geolocation has no latitude")?;
        let longitude = response.longitude.context("IP geolocation has no longitude")?;
        let mut location = Location::from_coords(latitude, longitude);
        if let Some(city) = response.city.filter(|c| !c.is_empty()) {
            location.name = city;
        }
        Ok(location)
    }
}

impl LocationProvider for IpLocationProvider {
    fn locate(&self) -> impl Future<Output = Result<Location>> + Send {
        self.detect()
    }
}

/// Where the app takes its location from.
#[derive(Debug, Clone)]
pub enum LocationSource {
    Fixed(Location),
    IpLookup(IpLocationProvider),
}

impl LocationSource {
    pub fn from_setting(location: Option<Location>) -> Self {
        match location {
            Some(location) => LocationSource::Fixed(location),
            None => LocationSource::IpLookup(IpLocationProvider::default()),
        }
    }
}

impl LocationProvider for LocationSource {
    async fn locate(&self) -> Result<Location> {
        match self {
            LocationSource::Fixed(location) => Ok(location.clone()),
            LocationSource::IpLookup(provider) => provider.detect().await,
        }
    }
}

/// Never fails: detection errors fall back to the default location.
pub async fn locate_or_default(provider: &impl LocationProvider) -> Location {
    match provider.locate().await {
        Ok(location) => location,
        Err(err) => {
            let fallback = Location::default();
            log::warn!("could not detect location ({err:#}), using {}", fallback.name);
            fallback
        }
    }
}
