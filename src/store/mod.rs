//! Key-value stores backing the response cache
//!
//! The fetcher reads and writes cache entries through the [`Store`] trait
//! rather than an ambient global, so tests can inject an in-memory fake.
//! Two implementations ship: [`MemoryStore`] for tests and short-lived
//! processes, and [`FileStore`] for persistence across restarts.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A synchronous string-keyed key-value store
///
/// `get` returns `None` for absent keys; `set` overwrites unconditionally.
/// Implementations are shared across an async fetcher, so they must be
/// `Send + Sync` and handle their own interior mutability.
pub trait Store: Send + Sync {
    /// Reads the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> std::io::Result<()>;
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        (**self).set(key, value)
    }
}
