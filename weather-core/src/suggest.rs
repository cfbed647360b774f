//! City autocomplete: de-duplicated lookups behind a trailing debounce.

use parking_lot::Mutex;
use std::{collections::HashSet, future::Future, sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{
    error::TransportError, model::Suggestion, provider::WeatherProvider, state::SharedState,
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Collapse suggestions sharing a (name, country) pair, keeping the first.
pub fn dedupe(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert((s.name.clone(), s.country.clone())))
        .collect()
}

#[derive(Debug, Clone)]
pub struct SuggestionFetcher {
    provider: Arc<dyn WeatherProvider>,
}

impl SuggestionFetcher {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Blank input yields an empty list without touching the network.
    pub async fn suggest(&self, text: &str) -> Result<Vec<Suggestion>, TransportError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.provider.suggest(text).await?;
        Ok(dedupe(raw))
    }
}

/// A scheduled debounce task.
#[derive(Debug)]
pub struct DebounceHandle {
    task: JoinHandle<()>,
}

impl DebounceHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Trailing debounce: only the last task scheduled within `delay` of quiet runs.
///
/// Dropping the debouncer cancels whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<DebounceHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Cancel the pending task, if any, then run `task` after the delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.cancel();
        }

        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        *pending = Some(DebounceHandle { task: handle });
    }

    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Feeds keystrokes through the debouncer and publishes results into
/// `AppState::suggestions`. Lookup failures only clear the list.
#[derive(Debug)]
pub struct Autocomplete {
    fetcher: SuggestionFetcher,
    debouncer: Debouncer,
    state: SharedState,
}

impl Autocomplete {
    pub fn new(fetcher: SuggestionFetcher, delay: Duration, state: SharedState) -> Self {
        Self {
            fetcher,
            debouncer: Debouncer::new(delay),
            state,
        }
    }

    pub fn input(&self, text: &str) {
        let fetcher = self.fetcher.clone();
        let state = self.state.clone();
        let text = text.to_string();

        self.debouncer.schedule(async move {
            let suggestions = match fetcher.suggest(&text).await {
                Ok(suggestions) => suggestions,
                Err(err) => {
                    warn!(%text, error = %err, "suggestion lookup failed");
                    Vec::new()
                }
            };
            debug!(%text, count = suggestions.len(), "suggestions updated");
            state.lock().suggestions = suggestions;
        });
    }

    /// Drop any pending lookup and empty the list.
    pub fn clear(&self) {
        self.debouncer.cancel();
        self.state.lock().suggestions.clear();
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::AppState, testing::FakeProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn paris() -> Vec<Suggestion> {
        vec![
            Suggestion::new("Paris", "FR"),
            Suggestion::new("Paris", "US"),
            Suggestion::new("Paris", "FR"),
            Suggestion::new("Parista", "BR"),
        ]
    }

    #[test]
    fn dedupe_keeps_first_occurrence_in_order() {
        let out = dedupe(paris());
        let keys: Vec<_> = out.iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec![("Paris", "FR"), ("Paris", "US"), ("Parista", "BR")]);
    }

    #[tokio::test]
    async fn blank_input_skips_network() {
        let provider = Arc::new(FakeProvider::new());
        let fetcher = SuggestionFetcher::new(provider.clone());

        for text in ["", " ", "\t\n  "] {
            assert!(fetcher.suggest(text).await.unwrap().is_empty());
        }
        assert!(provider.suggest_calls().is_empty());
    }

    #[tokio::test]
    async fn suggest_trims_and_dedupes() {
        let provider = Arc::new(FakeProvider::new().with_suggestions("Par", paris()));
        let fetcher = SuggestionFetcher::new(provider.clone());

        let out = fetcher.suggest("  Par ").await.unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(provider.suggest_calls(), vec!["Par".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_runs_only_after_quiet_period() {
        let debouncer = Debouncer::new(DEFAULT_DEBOUNCE);
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = runs.clone();
            debouncer.schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
            sleep(Duration::from_millis(299)).await;
            assert_eq!(runs.load(Ordering::SeqCst), 0);
        }

        sleep(Duration::from_millis(2)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_debouncer_cancels_pending_task() {
        let runs = Arc::new(AtomicUsize::new(0));
        {
            let debouncer = Debouncer::new(DEFAULT_DEBOUNCE);
            let runs = runs.clone();
            debouncer.schedule(async move {
                runs.fetch_add(1, Ordering::SeqCst);
            });
        }

        sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn autocomplete_issues_one_lookup_per_burst() {
        let provider = Arc::new(
            FakeProvider::new()
                .with_suggestions("Pari", vec![Suggestion::new("Paris", "FR")])
                .with_suggestions("Paris", paris()),
        );
        let state = Arc::new(Mutex::new(AppState::default()));
        let autocomplete = Autocomplete::new(
            SuggestionFetcher::new(provider.clone()),
            DEFAULT_DEBOUNCE,
            state.clone(),
        );

        for text in ["P", "Pa", "Par", "Pari", "Paris"] {
            autocomplete.input(text);
            sleep(Duration::from_millis(50)).await;
        }
        assert!(provider.suggest_calls().is_empty());

        sleep(DEFAULT_DEBOUNCE).await;
        assert_eq!(provider.suggest_calls(), vec!["Paris".to_string()]);
        assert_eq!(state.lock().suggestions.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn autocomplete_failure_clears_suggestions_silently() {
        let provider = Arc::new(FakeProvider::new().with_suggestions_down());
        let state = Arc::new(Mutex::new(AppState::default()));
        state.lock().suggestions = vec![Suggestion::new("Rome", "IT")];
        let autocomplete =
            Autocomplete::new(SuggestionFetcher::new(provider), DEFAULT_DEBOUNCE, state.clone());

        autocomplete.input("Ro");
        sleep(Duration::from_millis(400)).await;

        let state = state.lock();
        assert!(state.suggestions.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_lookup() {
        let provider = Arc::new(FakeProvider::new());
        let state = Arc::new(Mutex::new(AppState::default()));
        let autocomplete = Autocomplete::new(
            SuggestionFetcher::new(provider.clone()),
            DEFAULT_DEBOUNCE,
            state.clone(),
        );

        autocomplete.input("Lon");
        assert!(autocomplete.is_pending());
        autocomplete.clear();
        sleep(Duration::from_secs(1)).await;

        assert!(provider.suggest_calls().is_empty());
        assert!(!autocomplete.is_pending());
    }
}
