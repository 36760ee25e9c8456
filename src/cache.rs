//! Explicit caching for content lookups.
//!
//! An owned, bounded cache passed to whoever needs it. Entries carry a
//! TTL, expire on read, and the stalest entry is evicted at capacity.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::SourceError;
use crate::model::HiddenGem;
use crate::traits::HiddenGemSource;

/// Bounded map with per-entry time-to-live.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, (Instant, V)>,
    ttl: Duration,
    capacity: usize,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Fetch a live entry; an expired one is evicted on the way out.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = matches!(
            self.entries.get(key),
            Some((stored, _)) if stored.elapsed() >= self.ttl
        );
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|(_, value)| value.clone())
    }

    /// Insert, evicting the stalest entry once at capacity.
    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            let stalest = self
                .entries
                .iter()
                .min_by_key(|(_, (stored, _))| *stored)
                .map(|(k, _)| k.clone());
            if let Some(stale_key) = stalest {
                self.entries.remove(&stale_key);
            }
        }
        self.entries.insert(key, (Instant::now(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Caching decorator for a [`HiddenGemSource`].
///
/// Keyed by normalized region plus sorted interest tags. Lookup failures
/// pass through uncached so a flaky source can recover.
pub struct CachedGemSource<S> {
    inner: S,
    cache: Mutex<TtlCache<String, Vec<HiddenGem>>>,
}

impl<S: HiddenGemSource> CachedGemSource<S> {
    pub fn new(inner: S, ttl: Duration, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::new(ttl, capacity)),
        }
    }
}

impl<S: HiddenGemSource> HiddenGemSource for CachedGemSource<S> {
    fn gems_for(&self, region: &str, interests: &[String]) -> Result<Vec<HiddenGem>, SourceError> {
        let key = cache_key(region, interests);
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                debug!(region, "hidden gem cache hit");
                return Ok(hit);
            }
        }

        let gems = self.inner.gems_for(region, interests)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, gems.clone());
        }
        Ok(gems)
    }
}

fn cache_key(region: &str, interests: &[String]) -> String {
    let mut tags: Vec<String> = interests.iter().map(|tag| tag.to_lowercase()).collect();
    tags.sort();
    format!("{}|{}", region.to_lowercase().replace(' ', ""), tags.join(","))
}
