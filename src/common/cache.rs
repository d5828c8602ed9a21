//! Shared response cache keyed by entity identity.
//!
//! Uses moka's concurrent cache. Entries are never patched in place: a
//! mutation removes the keys it can affect and the next read refetches.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use crate::model::{MappingDocument, Signal};

/// Thread-safe in-memory cache with configurable capacity.
#[derive(Clone)]
pub struct MemCache<K, V> {
    entries: Cache<K, V>,
}

impl<K, V> MemCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Allocate a new [`MemCache`].
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Cache::new(capacity as u64),
        }
    }

    pub fn set(
        &self,
        key: K,
        value: V,
    ) {
        self.entries.insert(key, value);
    }

    pub fn get(
        &self,
        key: &K,
    ) -> Option<V> {
        self.entries.get(key)
    }

    pub fn remove(
        &self,
        key: &K,
    ) {
        self.entries.remove(key);
    }
}

/// Identity of a cached server response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// `GET /ui/signals`
    Signals,
    /// `GET /ui/signals/{name}`
    Signal(String),
    /// `GET /ui/combinations`
    Mapping,
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Signals(Arc<Vec<Signal>>),
    Signal(Arc<Signal>),
    Mapping(Arc<MappingDocument>),
}

/// Typed view over the shared [`MemCache`] of validated responses.
#[derive(Clone)]
pub struct ResponseCache {
    inner: MemCache<CacheKey, CacheEntry>,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: MemCache::new(capacity),
        }
    }

    pub fn signals(&self) -> Option<Arc<Vec<Signal>>> {
        match self.inner.get(&CacheKey::Signals) {
            Some(CacheEntry::Signals(v)) => Some(v),
            _ => None,
        }
    }

    pub fn set_signals(
        &self,
        signals: Arc<Vec<Signal>>,
    ) {
        self.inner.set(CacheKey::Signals, CacheEntry::Signals(signals));
    }

    pub fn signal(
        &self,
        name: &str,
    ) -> Option<Arc<Signal>> {
        match self.inner.get(&CacheKey::Signal(name.to_string())) {
            Some(CacheEntry::Signal(v)) => Some(v),
            _ => None,
        }
    }

    pub fn set_signal(
        &self,
        signal: Arc<Signal>,
    ) {
        self.inner.set(CacheKey::Signal(signal.name.clone()), CacheEntry::Signal(signal));
    }

    pub fn mapping(&self) -> Option<Arc<MappingDocument>> {
        match self.inner.get(&CacheKey::Mapping) {
            Some(CacheEntry::Mapping(v)) => Some(v),
            _ => None,
        }
    }

    pub fn set_mapping(
        &self,
        mapping: Arc<MappingDocument>,
    ) {
        self.inner.set(CacheKey::Mapping, CacheEntry::Mapping(mapping));
    }

    /// Drops exactly the given entries.
    pub fn invalidate(
        &self,
        keys: &[CacheKey],
    ) {
        for key in keys {
            debug!("cache::invalidate({:?})", key);
            self.inner.remove(key);
        }
    }

    pub fn contains(
        &self,
        key: &CacheKey,
    ) -> bool {
        self.inner.get(key).is_some()
    }
}
