//! Shared-result cache keyed by canonical feature set.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::domain::CanonicalKey;

struct Slots<T> {
    version: u64,
    entries: HashMap<CanonicalKey, Arc<T>>,
}

/// Thread-safe map from [`CanonicalKey`] to a shared result.
///
/// Values are computed outside the lock. When two callers race on the same
/// key the first insert wins and both receive that `Arc`. A value computed
/// across a [`clear`](Self::clear) is returned to its caller but not stored.
pub struct QueryCache<T> {
    inner: RwLock<Slots<T>>,
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Slots {
                version: 0,
                entries: HashMap::new(),
            }),
        }
    }

    pub fn get(&self, key: &CanonicalKey) -> Option<Arc<T>> {
        self.read().entries.get(key).cloned()
    }

    /// Return the cached value for `key`, computing it on a miss.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: &CanonicalKey,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        let version = {
            let slots = self.read();
            if let Some(hit) = slots.entries.get(key) {
                return Ok(Arc::clone(hit));
            }
            slots.version
        };

        let value = Arc::new(compute()?);

        let mut slots = self.write();
        if slots.version != version {
            return Ok(value);
        }
        Ok(Arc::clone(
            slots.entries.entry(key.clone()).or_insert(value),
        ))
    }

    /// Infallible variant of [`get_or_try_insert_with`](Self::get_or_try_insert_with).
    pub fn get_or_insert_with(&self, key: &CanonicalKey, compute: impl FnOnce() -> T) -> Arc<T> {
        match self.get_or_try_insert_with::<std::convert::Infallible>(key, || Ok(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Drop every entry. Previously returned `Arc`s stay valid.
    pub fn clear(&self) {
        let mut slots = self.write();
        slots.entries.clear();
        slots.version = slots.version.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.read().version
    }

    // Entries are pure functions of the catalog, so a panic mid-write cannot
    // leave them inconsistent.
    fn read(&self) -> RwLockReadGuard<'_, Slots<T>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slots<T>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for QueryCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.read();
        f.debug_struct("QueryCache")
            .field("version", &slots.version)
            .field("entries", &slots.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, thread};

    #[test]
    fn same_set_in_any_order_hits_one_entry() {
        let cache = QueryCache::new();
        let calls = Cell::new(0);

        let first = cache.get_or_insert_with(&CanonicalKey::new(["b", "a"]), || {
            calls.set(calls.get() + 1);
            "ab".to_string()
        });
        let second = cache.get_or_insert_with(&CanonicalKey::new(["a", "b", "a"]), || {
            calls.set(calls.get() + 1);
            "ab".to_string()
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache: QueryCache<u32> = QueryCache::new();
        let key = CanonicalKey::new(["x"]);

        let err = cache.get_or_try_insert_with(&key, || Err("boom"));
        assert_eq!(err, Err("boom"));
        assert!(cache.is_empty());

        let ok = cache.get_or_try_insert_with::<&str>(&key, || Ok(7)).unwrap();
        assert_eq!(*ok, 7);
    }

    #[test]
    fn clear_bumps_version_and_keeps_old_arcs() {
        let cache = QueryCache::new();
        let key = CanonicalKey::new(["x"]);
        let before = cache.get_or_insert_with(&key, || 1u8);

        cache.clear();
        assert_eq!(cache.version(), 1);
        assert!(cache.get(&key).is_none());

        let after = cache.get_or_insert_with(&key, || 1u8);
        assert_eq!(before, after);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn concurrent_callers_converge_on_one_value() {
        let cache = Arc::new(QueryCache::new());
        let key = CanonicalKey::new(["a", "b"]);

        let results: Vec<Arc<Vec<u32>>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let cache = Arc::clone(&cache);
                    let key = key.clone();
                    scope.spawn(move || cache.get_or_insert_with(&key, || vec![1, 2, 3]))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = cache.get(&key).unwrap();
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &stored)));
    }
}
