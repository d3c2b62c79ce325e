//! Cache entries and the fuzzy-expiry freshness rule
//!
//! A cached response is the whole envelope body plus an absolute expiry
//! timestamp, serialized as JSON into the key-value store. Expiry is fuzzy:
//! an entry with less than [`EXPIRY_GRACE_MS`] of remaining life is treated
//! as already expired, so callers are never handed data that would go stale
//! moments later.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Store;

/// Remaining life below which an entry counts as expired, in milliseconds
pub const EXPIRY_GRACE_MS: i64 = 3_000;

/// TTL applied when the caller supplies a negative one, in milliseconds
pub const DEFAULT_TTL_MS: i64 = 3_600_000;

/// Wrapper struct for a cached response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached envelope body
    pub payload: Value,
    /// When the entry expires
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates an entry expiring `ttl_ms` from now. Negative TTLs fall back
    /// to [`DEFAULT_TTL_MS`].
    pub fn new(payload: Value, ttl_ms: i64) -> Self {
        let ttl_ms = if ttl_ms < 0 { DEFAULT_TTL_MS } else { ttl_ms };
        Self {
            payload,
            expires_at: Utc::now() + Duration::milliseconds(ttl_ms),
        }
    }

    /// Whether the entry still has more than the grace window of life left
    /// at the given instant
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        (self.expires_at - now).num_milliseconds() > EXPIRY_GRACE_MS
    }

    /// Reads and parses the entry stored under `key`
    ///
    /// Returns `None` when the key is absent or the stored value cannot be
    /// parsed; both count as a cache miss.
    pub fn load(store: &dyn Store, key: &str) -> Option<Self> {
        let raw = store.get(key)?;
        serde_json::from_str(&raw).ok()
    }

    /// Serializes the entry and writes it under `key`, overwriting any
    /// previous entry
    pub fn save(&self, store: &dyn Store, key: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        store.set(key, &json)
    }
}
