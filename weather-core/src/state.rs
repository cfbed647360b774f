use parking_lot::Mutex;
use std::sync::Arc;

use crate::{
    favorites::find_favorite,
    model::{FavoriteCity, ForecastSeries, Suggestion, Unit, WeatherSnapshot},
};

/// Everything the view renders. Owned by [`crate::App`]; each component
/// mutates only its own fields.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub unit: Unit,
    pub snapshot: Option<WeatherSnapshot>,
    pub forecast: Option<ForecastSeries>,
    /// Unit `snapshot` and `forecast` were fetched in. Lags `unit` while a
    /// refetch after a toggle is in flight.
    pub snapshot_unit: Unit,
    pub loading: bool,
    pub error: Option<String>,
    pub favorites: Vec<FavoriteCity>,
    pub suggestions: Vec<Suggestion>,
    /// Sequence number of the most recently issued weather fetch.
    pub(crate) latest_request: u64,
}

impl AppState {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    /// Favorite entry matching the displayed snapshot, derived on every call.
    pub fn favorite(&self) -> Option<&FavoriteCity> {
        find_favorite(self.snapshot.as_ref(), &self.favorites)
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite().is_some()
    }

    /// Name of the city currently on screen, if any.
    pub fn resolved_city(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.name.as_str())
    }

    /// Nothing to show and nothing going on: the view's "enter a city" prompt.
    pub fn is_idle_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.snapshot.is_none()
    }
}

pub type SharedState = Arc<Mutex<AppState>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            name: name.into(),
            country: "FR".into(),
            temperature: 18.0,
            temp_min: 15.0,
            temp_max: 20.0,
            conditions: vec![],
        }
    }

    #[test]
    fn favorite_follows_snapshot_changes() {
        let mut state = AppState::default();
        state.favorites.push(FavoriteCity {
            id: "1".into(),
            name: "Paris".into(),
            country: "FR".into(),
        });
        assert!(!state.is_favorite());

        state.snapshot = Some(snapshot("paris"));
        assert!(state.is_favorite());

        state.snapshot = Some(snapshot("Lyon"));
        assert!(!state.is_favorite());

        state.favorites.clear();
        state.snapshot = Some(snapshot("Paris"));
        assert!(!state.is_favorite());
    }

    #[test]
    fn idle_empty_only_without_error_or_loading() {
        let mut state = AppState::default();
        assert!(state.is_idle_empty());

        state.loading = true;
        assert!(!state.is_idle_empty());

        state.loading = false;
        state.error = Some("nope".into());
        assert!(!state.is_idle_empty());
    }
}
