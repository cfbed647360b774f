//! Top-level coordinator tying search, weather, geolocation and favorites
//! together over one [`AppState`].

use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tracing::{debug, warn};

use crate::{
    Config,
    favorites::{FavoritesService, FavoritesStore, HttpFavoritesService},
    fetcher::{FetchOutcome, WeatherFetcher},
    geolocation::{LocationSource, location_source_from_config, resolve_location},
    model::{FavoriteCity, LocationQuery, NewFavorite, Suggestion, Unit},
    provider::{WeatherProvider, default_provider_from_config},
    state::{AppState, SharedState},
    suggest::{Autocomplete, DEFAULT_DEBOUNCE, SuggestionFetcher},
};

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub unit: Unit,
    pub debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: Unit::default(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            unit: config.unit,
            debounce: config.debounce(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    state: SharedState,
    weather: WeatherFetcher,
    favorites: FavoritesStore,
    autocomplete: Autocomplete,
    location: Arc<dyn LocationSource>,
}

impl App {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        favorites: Arc<dyn FavoritesService>,
        location: Arc<dyn LocationSource>,
        settings: Settings,
    ) -> Self {
        let state = Arc::new(Mutex::new(AppState::new(settings.unit)));

        Self {
            weather: WeatherFetcher::new(provider.clone(), state.clone()),
            favorites: FavoritesStore::new(favorites, state.clone()),
            autocomplete: Autocomplete::new(
                SuggestionFetcher::new(provider),
                settings.debounce,
                state.clone(),
            ),
            location,
            state,
        }
    }

    /// Wire up the configured provider, the HTTP favorites service and the
    /// configured location source.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider: Arc<dyn WeatherProvider> = default_provider_from_config(config)?.into();
        let favorites = Arc::new(HttpFavoritesService::new(config.favorites_url())?);
        let location = location_source_from_config(config);

        Ok(Self::new(provider, favorites, location, Settings::from(config)))
    }

    /// Replace the location source, e.g. with coordinates given on the command line.
    pub fn with_location(mut self, location: Arc<dyn LocationSource>) -> Self {
        self.location = location;
        self
    }

    pub fn state(&self) -> AppState {
        self.state.lock().clone()
    }

    pub fn unit(&self) -> Unit {
        self.state.lock().unit
    }

    pub fn set_unit(&self, unit: Unit) {
        self.state.lock().unit = unit;
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Session start: pull the favorites list. Failures leave it empty.
    pub async fn load_favorites(&self) {
        let _ = self.favorites.load().await;
    }

    pub fn input_changed(&self, text: &str) {
        self.autocomplete.input(text);
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.state.lock().suggestions.clone()
    }

    /// Search for typed text. Blank input is ignored.
    pub async fn submit(&self, text: &str) -> Option<FetchOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.search(LocationQuery::city(text)).await)
    }

    pub async fn select_suggestion(&self, suggestion: &Suggestion) -> FetchOutcome {
        self.search(LocationQuery::city(suggestion.name.clone())).await
    }

    pub async fn open_favorite(&self, favorite: &FavoriteCity) -> FetchOutcome {
        self.search(LocationQuery::city(favorite.name.clone())).await
    }

    async fn search(&self, query: LocationQuery) -> FetchOutcome {
        self.autocomplete.clear();
        self.fetch(query).await
    }

    async fn fetch(&self, query: LocationQuery) -> FetchOutcome {
        let unit = self.unit();
        self.weather.fetch(query, unit).await
    }

    /// Look up weather for the device position. Location errors go to the
    /// banner and leave the displayed weather alone.
    pub async fn use_current_location(&self) -> Option<FetchOutcome> {
        match resolve_location(self.location.as_ref()).await {
            Ok(query) => Some(self.fetch(query).await),
            Err(err) => {
                warn!(error = %err, "current location unavailable");
                self.state.lock().error = err.user_message().map(str::to_string);
                None
            }
        }
    }

    /// Flip metric/imperial and refetch the city on screen, if there is one.
    pub async fn toggle_unit(&self) -> Option<FetchOutcome> {
        let (unit, city) = {
            let mut state = self.state.lock();
            state.unit = state.unit.toggled();
            (state.unit, state.resolved_city().map(str::to_string))
        };

        let Some(city) = city else {
            debug!(%unit, "unit changed with nothing to refetch");
            return None;
        };
        Some(self.weather.fetch(LocationQuery::City(city), unit).await)
    }

    /// Add the displayed city to favorites, or remove it if it already is one.
    pub async fn toggle_favorite(&self) {
        let (snapshot, existing) = {
            let state = self.state.lock();
            (state.snapshot.clone(), state.favorite().map(|c| c.id.clone()))
        };

        match (snapshot, existing) {
            (Some(_), Some(id)) => {
                let _ = self.favorites.remove(&id).await;
            }
            (Some(snapshot), None) => {
                let _ = self.favorites.add(NewFavorite::from(&snapshot)).await;
            }
            (None, _) => {}
        }
    }

    pub async fn remove_favorite(&self, id: &str) {
        let _ = self.favorites.remove(id).await;
    }

    /// Cancel the pending autocomplete lookup.
    pub fn shutdown(&self) {
        self.autocomplete.clear();
    }
}
