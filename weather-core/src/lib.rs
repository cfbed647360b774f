//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Abstractions over the weather provider and the favorites service
//! - Shared domain models (queries, snapshots, forecasts, favorites)
//! - The coordination logic: debounced autocomplete, race-safe weather
//!   fetching, geolocation and favorites sync, tied together by [`App`]
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetcher;
pub mod format;
pub mod geolocation;
mod http;
pub mod model;
pub mod provider;
pub mod state;
pub mod suggest;

#[cfg(test)]
mod testing;

pub use app::{App, Settings};
pub use config::{Config, ProviderConfig};
pub use error::{Error, TransportError};
pub use favorites::{FavoritesService, FavoritesStore, HttpFavoritesService, find_favorite};
pub use fetcher::{FetchOutcome, WeatherFetcher};
pub use geolocation::{Denied, FixedLocation, LocationSource, Unsupported};
pub use model::{
    Condition, Coordinates, FavoriteCity, ForecastEntry, ForecastSeries, LocationQuery,
    NewFavorite, Suggestion, Unit, WeatherSnapshot,
};
pub use provider::{ProviderId, WeatherProvider};
pub use state::AppState;
pub use suggest::{Autocomplete, Debouncer, SuggestionFetcher};
