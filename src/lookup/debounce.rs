//! Debounced, last-write-wins search
//!
//! Every submission takes a ticket from a shared generation counter. A
//! submission waits out the delay and then runs its lookup, and both the wait
//! and the lookup are abandoned the moment a newer ticket is issued. Stale
//! results are dropped, never merged.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{search_foods, FoodSource, NutritionSearchResponse};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this clear the results instead of searching
pub const MIN_QUERY_CHARS: usize = 2;

pub struct SearchDebouncer<S: ?Sized> {
    source: Arc<S>,
    delay: Duration,
    generation: watch::Sender<u64>,
}

impl<S: FoodSource + ?Sized> SearchDebouncer<S> {
    pub fn new(source: Arc<S>, delay: Duration) -> Self {
        Self {
            source,
            delay,
            generation: watch::Sender::new(0),
        }
    }

    fn next_ticket(&self) -> u64 {
        let mut ticket = 0;
        self.generation.send_modify(|generation| {
            *generation += 1;
            ticket = *generation;
        });
        ticket
    }

    fn is_latest(&self, ticket: u64) -> bool {
        *self.generation.borrow() == ticket
    }

    /// Resolves once a newer submission has taken a ticket
    async fn superseded(&self, ticket: u64) {
        let mut generation = self.generation.subscribe();
        // The sender lives as long as `self`, so this only ends on a change
        let _ = generation.wait_for(|current| *current != ticket).await;
    }

    /// Submit a query.
    ///
    /// Returns `None` when a newer submission superseded this one, either
    /// during the delay or while the lookup was in flight; an in-flight
    /// lookup is dropped at that point. Lookup failures come back as an
    /// empty result set.
    pub async fn submit(&self, query: &str) -> Option<NutritionSearchResponse> {
        let ticket = self.next_ticket();
        let query = query.trim();

        if query.chars().count() < MIN_QUERY_CHARS {
            return Some(NutritionSearchResponse::empty(query));
        }

        tokio::select! {
            _ = tokio::time::sleep(self.delay) => {}
            _ = self.superseded(ticket) => {
                debug!("Search '{}' superseded before lookup", query);
                return None;
            }
        }

        let response = tokio::select! {
            result = search_foods(self.source.as_ref(), query) => match result {
                Ok(response) => response,
                Err(e) => {
                    warn!("Search '{}' failed: {}", query, e);
                    NutritionSearchResponse::empty(query)
                }
            },
            _ = self.superseded(ticket) => {
                debug!("Search '{}' superseded in flight, cancelled", query);
                return None;
            }
        };

        // Both branches can be ready on the same poll
        if !self.is_latest(ticket) {
            debug!("Search '{}' superseded in flight, discarding", query);
            return None;
        }

        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::testing::{apple, StaticFoodSource};

    fn debouncer(source: Arc<StaticFoodSource>) -> SearchDebouncer<StaticFoodSource> {
        SearchDebouncer::new(source, DEFAULT_DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_keystroke_searches() {
        let source = Arc::new(StaticFoodSource::new(vec![
            apple(1, "Apple"),
            apple(2, "Apple pie"),
        ]));
        let debouncer = debouncer(source.clone());

        let (first, second, third) = tokio::join!(
            debouncer.submit("ap"),
            debouncer.submit("app"),
            debouncer.submit("apple pie"),
        );

        assert!(first.is_none());
        assert!(second.is_none());
        let latest = third.unwrap();
        assert_eq!(latest.query, "apple pie");
        assert_eq!(latest.results.len(), 1);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_submissions_both_search() {
        let source = Arc::new(StaticFoodSource::new(vec![apple(1, "Apple")]));
        let debouncer = debouncer(source.clone());

        assert!(debouncer.submit("apple").await.is_some());
        assert!(debouncer.submit("apple").await.is_some());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_without_lookup() {
        let source = Arc::new(StaticFoodSource::new(vec![apple(1, "Apple")]));
        let debouncer = debouncer(source.clone());

        let response = debouncer.submit(" a ").await.unwrap();
        assert!(response.results.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_supersedes_pending_search() {
        let source = Arc::new(StaticFoodSource::new(vec![apple(1, "Apple")]));
        let debouncer = debouncer(source.clone());

        let (pending, cleared) = tokio::join!(debouncer.submit("apple"), debouncer.submit(""));
        assert!(pending.is_none());
        assert!(cleared.unwrap().results.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_query_cancels_lookup_in_flight() {
        let source = Arc::new(
            StaticFoodSource::new(vec![apple(1, "Apple"), apple(2, "Banana")])
                .with_latency(Duration::from_secs(2)),
        );
        let debouncer = Arc::new(debouncer(source.clone()));

        let first = tokio::spawn({
            let debouncer = Arc::clone(&debouncer);
            async move { debouncer.submit("apple").await }
        });

        // Past the debounce delay, so the first lookup is already running
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(source.calls(), 1);

        let second = debouncer.submit("banana").await.unwrap();
        assert!(first.await.unwrap().is_none());
        assert_eq!(second.query, "banana");
        assert_eq!(second.results[0].name, "Banana");

        assert_eq!(source.calls(), 2);
        assert_eq!(source.completed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_wait_returns_early() {
        let source = Arc::new(StaticFoodSource::new(vec![apple(1, "Apple")]));
        let debouncer = Arc::new(debouncer(source.clone()));

        let first = tokio::spawn({
            let debouncer = Arc::clone(&debouncer);
            async move { debouncer.submit("apple").await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        let started = tokio::time::Instant::now();
        debouncer.submit("").await;
        assert!(first.await.unwrap().is_none());
        assert!(started.elapsed() < DEFAULT_DEBOUNCE);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_yields_empty_results() {
        let source = Arc::new(StaticFoodSource::failing(500));
        let debouncer = debouncer(source);

        let response = debouncer.submit("apple").await.unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.total_hits, 0);
    }
}
