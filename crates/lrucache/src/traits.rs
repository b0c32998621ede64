//! Cache capability contract
//!
//! Callers that only need lookup and insertion depend on [`Cache`] rather
//! than a concrete eviction policy, so the policy can be swapped without
//! touching them.

use crate::error::Result;

/// Key-value cache with a bounded number of entries
///
/// Both operations take `&self`: implementations are expected to be shared
/// between threads and to serialize their own state changes.
pub trait Cache<K, V> {
    /// Look up `key`, marking it as recently used on a hit
    ///
    /// # Returns
    /// * `Ok(value)` - A clone of the cached value
    /// * `Err(Error::NotFound)` - The key is not cached
    ///
    /// A miss is the only error `get` reports. `Error::InvalidCapacity` is
    /// raised by constructors, never by lookups.
    fn get(&self, key: &K) -> Result<V>;

    /// Insert or overwrite `key`, evicting per the cache's policy if full
    fn put(&self, key: K, value: V);
}

impl<K, V, C> Cache<K, V> for std::sync::Arc<C>
where
    C: Cache<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Result<V> {
        (**self).get(key)
    }

    fn put(&self, key: K, value: V) {
        (**self).put(key, value)
    }
}
