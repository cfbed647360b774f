//! In-memory stand-ins for the provider, favorites service and location source.

use async_trait::async_trait;
use chrono::DateTime;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::{collections::HashMap, time::Duration};

use crate::{
    error::{Error, TransportError},
    favorites::FavoritesService,
    geolocation::LocationSource,
    model::{
        Condition, Coordinates, FavoriteCity, ForecastEntry, ForecastSeries, LocationQuery,
        NewFavorite, Suggestion, Unit, WeatherSnapshot,
    },
    provider::WeatherProvider,
};

pub(crate) const HERE: &str = "Greenwich";

fn not_found(endpoint: &'static str) -> TransportError {
    TransportError::Status {
        endpoint,
        status: StatusCode::NOT_FOUND,
        body: r#"{"cod":"404","message":"city not found"}"#.into(),
    }
}

#[derive(Debug, Clone, Copy)]
struct FakeCity {
    delay: Duration,
    current_ok: bool,
    forecast_ok: bool,
}

/// Knows a fixed set of cities. Unknown cities answer 404; coordinates
/// resolve to [`HERE`].
#[derive(Debug, Default)]
pub(crate) struct FakeProvider {
    cities: HashMap<String, FakeCity>,
    suggestions: HashMap<String, Vec<Suggestion>>,
    suggestions_down: bool,
    current_calls: Mutex<Vec<(LocationQuery, Unit)>>,
    forecast_calls: Mutex<Vec<(LocationQuery, Unit)>>,
    suggest_calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self::default().with_city(HERE, 0)
    }

    pub(crate) fn with_city(mut self, name: &str, delay_ms: u64) -> Self {
        self.cities.insert(
            name.to_lowercase(),
            FakeCity {
                delay: Duration::from_millis(delay_ms),
                current_ok: true,
                forecast_ok: true,
            },
        );
        self
    }

    /// Both lookups for `name` answer 404, but only after `delay_ms`.
    pub(crate) fn with_failing_city(mut self, name: &str, delay_ms: u64) -> Self {
        self.cities.insert(
            name.to_lowercase(),
            FakeCity {
                delay: Duration::from_millis(delay_ms),
                current_ok: false,
                forecast_ok: false,
            },
        );
        self
    }

    pub(crate) fn with_broken_forecast(mut self, name: &str) -> Self {
        self.cities.insert(
            name.to_lowercase(),
            FakeCity {
                delay: Duration::ZERO,
                current_ok: true,
                forecast_ok: false,
            },
        );
        self
    }

    pub(crate) fn with_suggestions(mut self, text: &str, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions.insert(text.to_string(), suggestions);
        self
    }

    pub(crate) fn with_suggestions_down(mut self) -> Self {
        self.suggestions_down = true;
        self
    }

    pub(crate) fn current_calls(&self) -> Vec<(LocationQuery, Unit)> {
        self.current_calls.lock().clone()
    }

    pub(crate) fn forecast_calls(&self) -> Vec<(LocationQuery, Unit)> {
        self.forecast_calls.lock().clone()
    }

    pub(crate) fn suggest_calls(&self) -> Vec<String> {
        self.suggest_calls.lock().clone()
    }

    fn lookup(&self, query: &LocationQuery) -> Option<(String, FakeCity)> {
        let name = match query {
            LocationQuery::City(name) => name.clone(),
            LocationQuery::Coordinates(_) => HERE.to_string(),
        };
        let city = self.cities.get(&name.to_lowercase()).copied()?;
        Some((name, city))
    }
}

fn temperature(unit: Unit) -> f64 {
    match unit {
        Unit::Metric => 20.0,
        Unit::Imperial => 68.0,
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current(
        &self,
        query: &LocationQuery,
        unit: Unit,
    ) -> Result<WeatherSnapshot, TransportError> {
        self.current_calls.lock().push((query.clone(), unit));
        let (name, city) = self.lookup(query).ok_or_else(|| not_found("fake current"))?;
        tokio::time::sleep(city.delay).await;
        if !city.current_ok {
            return Err(not_found("fake current"));
        }

        let temp = temperature(unit);
        Ok(WeatherSnapshot {
            name,
            country: "GB".into(),
            temperature: temp,
            temp_min: temp - 2.0,
            temp_max: temp + 2.0,
            conditions: vec![Condition {
                description: "broken clouds".into(),
                icon: "04d".into(),
            }],
        })
    }

    async fn forecast(
        &self,
        query: &LocationQuery,
        unit: Unit,
    ) -> Result<ForecastSeries, TransportError> {
        self.forecast_calls.lock().push((query.clone(), unit));
        let (_, city) = self.lookup(query).ok_or_else(|| not_found("fake forecast"))?;
        tokio::time::sleep(city.delay).await;

        if !city.forecast_ok {
            return Err(TransportError::Status {
                endpoint: "fake forecast",
                status: StatusCode::BAD_GATEWAY,
                body: String::new(),
            });
        }

        let entries = (0..8)
            .map(|step| ForecastEntry {
                timestamp: DateTime::from_timestamp(1_700_000_000 + step * 10_800, 0)
                    .unwrap_or_default(),
                temperature: temperature(unit) + step as f64,
                precipitation_probability: 0.1 * step as f64,
                rain_volume_mm: None,
                condition: None,
            })
            .collect();
        Ok(ForecastSeries { entries })
    }

    async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, TransportError> {
        self.suggest_calls.lock().push(text.to_string());
        if self.suggestions_down {
            return Err(TransportError::Status {
                endpoint: "fake search",
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            });
        }
        Ok(self.suggestions.get(text).cloned().unwrap_or_default())
    }
}

/// Favorites service backed by a Vec; can be switched off to simulate outages.
#[derive(Debug, Default)]
pub(crate) struct FakeFavorites {
    pub(crate) records: Mutex<Vec<FavoriteCity>>,
    down: Mutex<bool>,
    next_id: Mutex<u32>,
}

impl FakeFavorites {
    pub(crate) fn with(records: Vec<FavoriteCity>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub(crate) fn set_down(&self, down: bool) {
        *self.down.lock() = down;
    }

    fn check(&self) -> Result<(), TransportError> {
        if *self.down.lock() {
            Err(TransportError::Status {
                endpoint: "fake favorites",
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FavoritesService for FakeFavorites {
    async fn list(&self) -> Result<Vec<FavoriteCity>, TransportError> {
        self.check()?;
        Ok(self.records.lock().clone())
    }

    async fn create(&self, city: &NewFavorite) -> Result<FavoriteCity, TransportError> {
        self.check()?;
        let mut next_id = self.next_id.lock();
        *next_id += 1;
        let record = FavoriteCity {
            id: format!("fav-{}", *next_id),
            name: city.name.clone(),
            country: city.country.clone(),
        };
        self.records.lock().push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        self.check()?;
        self.records.lock().retain(|c| c.id != id);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum FakeLocation {
    Granted,
    Denied,
    Unsupported,
}

#[async_trait]
impl LocationSource for FakeLocation {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        match self {
            FakeLocation::Granted => Ok(Coordinates {
                latitude: 51.4779,
                longitude: 0.0015,
            }),
            FakeLocation::Denied => Err(Error::GeolocationDenied),
            FakeLocation::Unsupported => Err(Error::GeolocationUnsupported),
        }
    }
}
