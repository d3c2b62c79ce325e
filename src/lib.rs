//! fetchcache
//!
//! HTTP client helper with optional time-bounded local caching. Requests go
//! out through a [`CachedFetcher`]; when cache parameters are supplied it
//! serves from an injected key-value store instead of the network as long as
//! the stored entry has comfortably more than its expiry grace window left.

pub mod cache;
pub mod client;
pub mod envelope;
pub mod error;
pub mod request;
pub mod store;

pub use client::CachedFetcher;
pub use envelope::Envelope;
pub use error::FetchError;
pub use request::{CacheParams, Method, RequestSettings};
pub use store::{FileStore, MemoryStore, Store};
