use super::*;

impl AppState {
    /// Kicks off a location lookup or weather fetch in the background. Without
    /// an API key the placeholder is rebuilt around the current time instead.
    pub(crate) fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if self.fetch_in_flight {
            return;
        }
        if self.settings.api_key.is_none() {
            if self.observation.details.is_placeholder {
                self.observation = WeatherObservation::placeholder(&self.city_name(), Utc::now());
            }
            let resolved = self.resolver.resolve(&self.observation);
            self.apply_resolved(resolved);
            return;
        }

        self.fetch_in_flight = true;
        match self.location.clone() {
            Some(location) => self.fetch_observation(tx, location),
            None => {
                let source = LocationSource::from_setting(None);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let location = locate_or_default(&source).await;
                    let _ = tx.send(AppEvent::LocationResolved(location)).await;
                });
            }
        }
    }

    pub(crate) fn fetch_observation(&mut self, tx: &mpsc::Sender<AppEvent>, location: Location) {
        let Some(client) = self.weather_client() else {
            self.fetch_in_flight = false;
            return;
        };
        self.fetch_in_flight = true;
        spawn_fetch(client, location, tx.clone());
    }

    /// Inline variant for the headless modes: locate, fetch and apply without
    /// going through the event loop. Failures leave the placeholder in place.
    pub async fn refresh_now(&mut self) {
        if self.mode != WeatherMode::Auto {
            return;
        }
        let Some(client) = self.weather_client() else {
            log::info!("no API key configured, showing placeholder weather");
            return;
        };
        let location = match self.location.clone() {
            Some(location) => location,
            None => {
                let location = locate_or_default(&LocationSource::from_setting(None)).await;
                self.location = Some(location.clone());
                location
            }
        };
        match client.current(&location).await {
            Ok(observation) => self.accept_observation(observation),
            Err(err) => {
                log::warn!("weather update failed: {err}");
                self.last_error = Some(err.to_string());
                self.observation = WeatherObservation::placeholder(&self.city_name(), Utc::now());
                let resolved = self.resolver.resolve(&self.observation);
                self.apply_resolved(resolved);
            }
        }
    }

    fn weather_client(&self) -> Option<OpenWeatherClient> {
        let api_key = self.settings.api_key.as_deref()?;
        Some(match self.settings.weather_url.as_deref() {
            Some(url) => OpenWeatherClient::with_base_url(url, api_key),
            None => OpenWeatherClient::new(api_key),
        })
    }
}

fn spawn_fetch<S>(source: S, location: Location, tx: mpsc::Sender<AppEvent>)
where
    S: WeatherSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let event = match source.current(&location).await {
            Ok(observation) => AppEvent::ObservationFetched(observation),
            Err(err) => AppEvent::FetchFailed(err.to_string()),
        };
        let _ = tx.send(event).await;
    });
}
