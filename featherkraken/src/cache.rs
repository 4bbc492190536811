//! Caching layer for airport lookups.
//!
//! Airports are immutable once fetched, and the typeahead fires a lookup on
//! nearly every keystroke, so lookup responses are cached by normalized
//! query. Flight searches are never cached: every search must reflect the
//! backend's current offers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::api::{ApiError, FlightApi};
use crate::domain::{Airport, SearchRequest, SearchResult};

/// Cached lookup entry.
type LookupEntry = Arc<Vec<Airport>>;

/// Configuration for the airport lookup cache.
#[derive(Debug, Clone)]
pub struct AirportCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,
}

impl Default for AirportCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Cache key for a lookup query: trimmed and lowercased.
fn query_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Search API client with cached airport lookups.
///
/// Wraps any [`FlightApi`] implementation.
pub struct CachedFlightClient<A> {
    inner: A,
    lookups: MokaCache<String, LookupEntry>,
}

impl<A: FlightApi> CachedFlightClient<A> {
    /// Create a new cached client.
    pub fn new(inner: A, config: &AirportCacheConfig) -> Self {
        let lookups = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, lookups }
    }

    /// The wrapped client.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.lookups.entry_count()
    }

    /// Invalidate all cached lookups.
    pub fn invalidate_all(&self) {
        self.lookups.invalidate_all();
    }
}

impl<A: FlightApi> FlightApi for CachedFlightClient<A> {
    async fn search_airports(&self, query: &str) -> Result<Vec<Airport>, ApiError> {
        let key = query_key(query);

        if let Some(cached) = self.lookups.get(&key).await {
            trace!(query = %key, "airport lookup cache hit");
            return Ok(cached.as_ref().clone());
        }

        // Failures are not cached
        let airports = self.inner.search_airports(query).await?;
        self.lookups.insert(key, Arc::new(airports.clone())).await;
        Ok(airports)
    }

    async fn search_flights(&self, request: &SearchRequest) -> Result<SearchResult, ApiError> {
        self.inner.search_flights(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Counts calls and answers every lookup with one airport named after the query.
    #[derive(Default)]
    struct CountingApi {
        lookups: Mutex<usize>,
        searches: Mutex<usize>,
        fail: bool,
    }

    impl FlightApi for CountingApi {
        async fn search_airports(&self, query: &str) -> Result<Vec<Airport>, ApiError> {
            *self.lookups.lock().unwrap() += 1;
            if self.fail {
                return Err(ApiError::Http {
                    message: "offline".into(),
                });
            }
            Ok(vec![Airport::new(query.to_uppercase(), "Somewhere")])
        }

        async fn search_flights(&self, _request: &SearchRequest) -> Result<SearchResult, ApiError> {
            *self.searches.lock().unwrap() += 1;
            Ok(SearchResult::default())
        }
    }

    #[test]
    fn query_key_normalizes() {
        assert_eq!(query_key("  ViE "), "vie");
    }

    #[test]
    fn default_config() {
        let config = AirportCacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn repeated_lookup_hits_cache() {
        let client = CachedFlightClient::new(CountingApi::default(), &AirportCacheConfig::default());

        let first = client.search_airports("vie").await.unwrap();
        let second = client.search_airports(" VIE").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(*client.inner().lookups.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let api = CountingApi {
            fail: true,
            ..CountingApi::default()
        };
        let client = CachedFlightClient::new(api, &AirportCacheConfig::default());

        assert!(client.search_airports("vie").await.is_err());
        assert!(client.search_airports("vie").await.is_err());
        assert_eq!(*client.inner().lookups.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn flight_searches_always_reach_the_backend() {
        let client = CachedFlightClient::new(CountingApi::default(), &AirportCacheConfig::default());
        let request = SearchRequest::default();

        client.search_flights(&request).await.unwrap();
        client.search_flights(&request).await.unwrap();
        assert_eq!(*client.inner().searches.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let client = CachedFlightClient::new(CountingApi::default(), &AirportCacheConfig::default());

        client.search_airports("vie").await.unwrap();
        client.invalidate_all();
        client.search_airports("vie").await.unwrap();
        assert_eq!(*client.inner().lookups.lock().unwrap(), 2);
    }
}
