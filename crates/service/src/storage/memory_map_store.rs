use std::{borrow::Borrow, collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::RwLock;

/// Generic in-memory key-value map store.
///
/// Wraps a `HashMap<K, V>` behind one async `RwLock`. Reads clone values out,
/// writes hold the lock for the duration of a single mutation. Nothing is
/// persisted; the map lives as long as the last clone of the store.
#[derive(Clone)]
pub struct MemoryMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryMapStore<K, V> {
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get value by key.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or replace a value; returns the previous one.
    pub async fn insert(&self, key: K, value: V) -> Option<V> {
        let mut map = self.inner.write().await;
        map.insert(key, value)
    }

    /// Run `f` on the entry for `key`, creating it with `V::default()` when
    /// missing. The write lock is held for the whole call.
    pub async fn update_entry<F, R>(&self, key: K, f: F) -> R
    where
        V: Default,
        F: FnOnce(&mut V) -> R,
    {
        let mut map = self.inner.write().await;
        f(map.entry(key).or_default())
    }
}
