//! Current conditions + forecast retrieval with last-issued-wins commits.
//!
//! Every call to [`WeatherFetcher::fetch`] takes a fresh sequence number.
//! Results are committed only if that number is still the latest issued when
//! both halves have completed, so an older request finishing late can never
//! overwrite a newer one.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::{FETCH_ERROR_MESSAGE, TransportError},
    model::{ForecastSeries, LocationQuery, Unit, WeatherSnapshot},
    provider::WeatherProvider,
    state::SharedState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Snapshot and forecast are now on screen.
    Committed,
    /// State was reset and the error banner set.
    Failed,
    /// A newer fetch was issued meanwhile; this result was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    provider: Arc<dyn WeatherProvider>,
    state: SharedState,
}

impl WeatherFetcher {
    pub fn new(provider: Arc<dyn WeatherProvider>, state: SharedState) -> Self {
        Self { provider, state }
    }

    pub async fn fetch(&self, query: LocationQuery, unit: Unit) -> FetchOutcome {
        let seq = self.begin();
        let _loading = LoadingGuard {
            state: &self.state,
            seq,
        };
        debug!(seq, %query, %unit, "fetching weather");

        let result = tokio::try_join!(
            self.provider.current(&query, unit),
            self.provider.forecast(&query, unit),
        );

        self.commit(seq, &query, unit, result)
    }

    fn begin(&self) -> u64 {
        let mut state = self.state.lock();
        state.latest_request += 1;
        state.loading = true;
        state.error = None;
        state.latest_request
    }

    fn commit(
        &self,
        seq: u64,
        query: &LocationQuery,
        unit: Unit,
        result: Result<(WeatherSnapshot, ForecastSeries), TransportError>,
    ) -> FetchOutcome {
        let mut state = self.state.lock();

        if state.latest_request != seq {
            debug!(
                seq,
                latest = state.latest_request,
                "discarding superseded weather result"
            );
            return FetchOutcome::Superseded;
        }

        match result {
            Ok((snapshot, forecast)) => {
                debug!(seq, city = %snapshot.name, entries = forecast.len(), "weather committed");
                state.snapshot = Some(snapshot);
                state.forecast = Some(forecast);
                state.snapshot_unit = unit;
                state.error = None;
                FetchOutcome::Committed
            }
            Err(err) => {
                warn!(seq, %query, error = %err, "weather fetch failed");
                state.snapshot = None;
                state.forecast = None;
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                FetchOutcome::Failed
            }
        }
    }
}

/// Clears the loading flag when a fetch ends, including when its future is
/// dropped mid-flight. A superseded fetch leaves the flag to the newer one.
struct LoadingGuard<'a> {
    state: &'a SharedState,
    seq: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if state.latest_request == self.seq {
            state.loading = false;
        }
    }
}
