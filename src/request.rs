//! Request settings and cache parameters
//!
//! Typed replacements for the loose settings/cacheParams objects the fetcher
//! dispatches on. Method and field presence are enforced by construction;
//! the only checks left for runtime are non-empty url and cache key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// Maps to the transport's method type
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Settings for a single request: method, target URL, optional query
/// parameters, optional JSON body
#[derive(Debug, Clone)]
pub struct RequestSettings {
    /// HTTP method
    pub method: Method,
    /// Target address, joined onto the client's base URL unless absolute
    pub url: String,
    /// Query parameters appended to the URL
    pub params: Vec<(String, String)>,
    /// JSON request body, if any
    pub data: Option<Value>,
}

impl RequestSettings {
    /// Creates settings for the given method and url
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            data: None,
        }
    }

    /// Shorthand for a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    /// Shorthand for a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Appends a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON request body
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Checks the runtime invariants the type system cannot express
    pub(crate) fn validate(&self) -> Result<(), FetchError> {
        if self.url.is_empty() {
            return Err(FetchError::MissingUrl);
        }
        Ok(())
    }
}

/// Caching parameters for a request: a store key, a TTL in milliseconds,
/// and whether to bypass the cache and refetch immediately
#[derive(Debug, Clone)]
pub struct CacheParams {
    /// Store key the response is cached under
    pub key: String,
    /// Time-to-live in milliseconds; negative values fall back to one hour
    pub ttl_ms: i64,
    /// When true, skip the cache read and always perform a fresh request
    pub force_refresh: bool,
}

impl CacheParams {
    /// Creates cache parameters with `force_refresh` off
    pub fn new(key: impl Into<String>, ttl_ms: i64) -> Self {
        Self {
            key: key.into(),
            ttl_ms,
            force_refresh: false,
        }
    }

    /// Marks this request to bypass the cache read
    pub fn force_refresh(mut self) -> Self {
        self.force_refresh = true;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), FetchError> {
        if self.key.is_empty() {
            return Err(FetchError::EmptyCacheKey);
        }
        Ok(())
    }
}
