//! The cached fetcher
//!
//! Wraps a `reqwest::Client` with the cache-or-fetch decision: requests
//! dispatched with cache parameters consult the injected store first and only
//! hit the network when the entry is absent, stale, or bypassed with
//! `force_refresh`. Successful responses are judged by the envelope's result
//! sentinel; anything else is a typed error.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::CacheEntry;
use crate::envelope::Envelope;
use crate::error::FetchError;
use crate::request::{CacheParams, Method, RequestSettings};
use crate::store::Store;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client with optional time-bounded response caching
///
/// Holds a base URL, a transport with a fixed request timeout, and an
/// injected key-value [`Store`] for cache entries and the session token.
/// The fetcher itself keeps no per-key state; concurrent calls on the same
/// cache key are not coordinated, so two simultaneous misses both reach the
/// network and the last store write wins.
#[derive(Debug, Clone)]
pub struct CachedFetcher<S: Store> {
    http: reqwest::Client,
    base_url: String,
    store: S,
    token_key: Option<String>,
}

impl<S: Store> CachedFetcher<S> {
    /// Creates a fetcher for the given base URL with the default timeout
    pub fn new(base_url: impl Into<String>, store: S) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            store,
            token_key: None,
        })
    }

    /// Replaces the transport with one using the given request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Uses a custom, pre-configured HTTP client
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Configures the store key holding the session token
    ///
    /// When set, every outgoing request carries the store's current value for
    /// that key in a `token` header. Requests go out without the header while
    /// the key is absent.
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = Some(key.into());
        self
    }

    /// The injected store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Top-level dispatch: caches when cache parameters are supplied,
    /// otherwise performs a plain request
    pub async fn request(
        &self,
        settings: RequestSettings,
        cache: Option<CacheParams>,
    ) -> Result<Value, FetchError> {
        match cache {
            Some(cache) => self.fetch_with_cache(cache, settings).await,
            None => self.fetch(settings).await,
        }
    }

    /// Performs the request without touching the cache and resolves with the
    /// envelope payload
    pub async fn fetch(&self, settings: RequestSettings) -> Result<Value, FetchError> {
        settings.validate()?;
        self.execute(&settings, None).await
    }

    /// Serves from the cache when a fresh entry exists, otherwise performs
    /// the request and stores its result under the cache key
    ///
    /// An entry within [`crate::cache::EXPIRY_GRACE_MS`] of its expiry counts
    /// as a miss and is overwritten by the fresh response.
    pub async fn fetch_with_cache(
        &self,
        cache: CacheParams,
        settings: RequestSettings,
    ) -> Result<Value, FetchError> {
        settings.validate()?;
        cache.validate()?;

        if !cache.force_refresh {
            if let Some(entry) = CacheEntry::load(&self.store, &cache.key) {
                if entry.is_fresh(Utc::now()) {
                    debug!(key = %cache.key, "cache hit");
                    return Ok(Envelope::from_value(entry.payload).payload());
                }
                debug!(key = %cache.key, "cache entry stale, refetching");
            }
        }

        self.execute(&settings, Some(&cache)).await
    }

    /// Issues the request, checks the envelope sentinel, and writes the cache
    /// entry when one was requested
    async fn execute(
        &self,
        settings: &RequestSettings,
        cache: Option<&CacheParams>,
    ) -> Result<Value, FetchError> {
        let url = self.resolve_url(&settings.url);
        let mut req = self.http.request(settings.method.as_reqwest(), url);

        if !settings.params.is_empty() {
            req = req.query(&settings.params);
        }
        if settings.method == Method::Get {
            // Cache-buster: defeats intermediate caching of repeated GETs
            req = req.query(&[("time", Utc::now().timestamp_millis().to_string())]);
        }
        if let Some(data) = &settings.data {
            req = req.json(data);
        }
        if let Some(token_key) = &self.token_key {
            if let Some(token) = self.store.get(token_key) {
                req = req.header("token", token);
            }
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("transport failure: {e}");
                return Err(e.into());
            }
        };

        let body = response.text().await?;
        let envelope = Envelope::parse(&body)?;

        if !envelope.is_success() {
            let code = envelope.result().unwrap_or_default().to_string();
            return Err(FetchError::NonSuccess(code));
        }

        if let Some(cache) = cache {
            let entry = CacheEntry::new(envelope.raw().clone(), cache.ttl_ms);
            // A failed write downgrades caching, never the request itself
            if let Err(e) = entry.save(&self.store, &cache.key) {
                warn!(key = %cache.key, "failed to write cache entry: {e}");
            }
        }

        Ok(envelope.payload())
    }

    /// Joins a relative target onto the base URL; absolute targets pass
    /// through unchanged
    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn fetcher() -> CachedFetcher<MemoryStore> {
        CachedFetcher::new("http://localhost:9", MemoryStore::new())
            .expect("client should build")
    }

    #[test]
    fn test_relative_url_joins_base() {
        let f = fetcher();
        assert_eq!(f.resolve_url("/api/user"), "http://localhost:9/api/user");
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let f = fetcher();
        assert_eq!(
            f.resolve_url("https://example.com/api"),
            "https://example.com/api"
        );
    }

    #[tokio::test]
    async fn test_empty_url_fails_before_network() {
        let f = fetcher();
        let result = f.fetch(RequestSettings::get("")).await;
        assert!(matches!(result, Err(FetchError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_empty_cache_key_fails_before_network() {
        let f = fetcher();
        let result = f
            .fetch_with_cache(CacheParams::new("", 60_000), RequestSettings::get("/api/user"))
            .await;
        assert!(matches!(result, Err(FetchError::EmptyCacheKey)));
    }
}
