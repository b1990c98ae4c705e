//! Bounded LRU cache of resolved matches.
//!
//! Keyed by `"METHOD path"` (raw path, pre-normalization) so repeated hits
//! on the same literal URL skip both the static index and the trie.
//!
//! Invalidation is generation-based: every registration bumps the router's
//! monotonic generation counter, and each entry carries the generation it
//! was created under. On read, an entry from an older generation is treated
//! as a miss and evicted lazily. Registrations therefore never pay an O(n)
//! cache scan, and a startup loop of `register` calls cannot stall a
//! request. A hit clones the stored params — handlers must never be able to
//! mutate shared cache state.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use super::compile::CompiledRoute;
use super::core::ParamVec;

/// Hit/miss counters and occupancy for [`Router::cache_stats`](crate::Router::cache_stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads served from the cache.
    pub hits: u64,
    /// Reads that fell through to the index/trie, including lazily evicted
    /// stale-generation entries.
    pub misses: u64,
    /// Live entries (stale ones included until they are read).
    pub entries: usize,
    /// Configured bound.
    pub capacity: usize,
}

struct CacheEntry<H> {
    route: Arc<CompiledRoute<H>>,
    params: ParamVec,
    generation: u64,
}

pub(crate) struct MatchCache<H> {
    entries: LruCache<String, CacheEntry<H>>,
    hits: u64,
    misses: u64,
}

impl<H> MatchCache<H> {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub(crate) fn get(
        &mut self,
        key: &str,
        generation: u64,
    ) -> Option<(Arc<CompiledRoute<H>>, ParamVec)> {
        let stale = match self.entries.get(key) {
            Some(entry) if entry.generation == generation => {
                self.hits += 1;
                return Some((Arc::clone(&entry.route), entry.params.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if stale {
            self.entries.pop(key);
        }
        self.misses += 1;
        None
    }

    pub(crate) fn put(
        &mut self,
        key: String,
        route: Arc<CompiledRoute<H>>,
        params: ParamVec,
        generation: u64,
    ) {
        self.entries.put(
            key,
            CacheEntry {
                route,
                params,
                generation,
            },
        );
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
            capacity: self.entries.cap().get(),
        }
    }
}
