//! # lrucache
//!
//! Fixed-capacity, thread-safe LRU cache.
//!
//! ## Architecture
//! - **HashMap**: AHash map from key to list node (O(1) lookup)
//! - **Recency list**: Arena-backed doubly linked list (O(1) touch and eviction)
//! - **Locking**: One mutex guards map and list together, so every operation is atomic
//!
//! ```
//! use lrucache::{Cache, CacheConfig, LruCache};
//!
//! let cache = LruCache::from_config(&CacheConfig::new(128).with_name("users")).unwrap();
//! cache.put(7u64, "alice".to_string());
//!
//! match cache.get(&8) {
//!     Ok(name) => println!("hit: {}", name),
//!     Err(e) if e.is_not_found() => println!("miss, fill from backing store"),
//!     Err(e) => panic!("{}", e),
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod list;
mod lru;
mod stats;
mod traits;

pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use lru::LruCache;
pub use stats::{CacheStats, StatsSnapshot};
pub use traits::Cache;
