//! Key-Value persistence port for the ordering portal.
//!
//! Provides the [`KvStore`] trait that domain code depends on, two stores
//! ([`MemoryStore`] for tests and embedding, [`FileStore`] for durable local
//! state), and a typed [`Cache`] wrapper with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use portal_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart_guest", &vec!["A1", "B2"]).unwrap();
//!
//! let items: Option<Vec<String>> = cache.get("cart_guest").unwrap();
//! assert_eq!(items.unwrap().len(), 2);
//!
//! cache.delete("cart_guest").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod store;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;
pub use store::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
