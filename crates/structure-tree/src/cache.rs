//! Resolution cache with a staleness window
//!
//! Memoizes the children resolved for a node, keyed by the node's composite
//! id. An entry is served until the staleness window has elapsed since it was
//! stored; the next read after that is a miss and drops the entry. There is no
//! other eviction.

use dashmap::DashMap;
use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::node::{NodeId, StructureNode};

/// Source of the current time for staleness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap_or_else(PoisonError::into_inner) += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    children: Vec<StructureNode>,
    stored_at: Instant,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Resolved children per node id, valid for a fixed staleness window
pub struct ResolutionCache {
    entries: DashMap<NodeId, CacheEntry>,
    staleness: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    /// Create a cache on the system clock
    pub fn new(staleness: Duration) -> Self {
        Self::with_clock(staleness, Arc::new(SystemClock))
    }

    pub fn with_clock(staleness: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            staleness,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn staleness(&self) -> Duration {
        self.staleness
    }

    /// Look up the children stored for `id`; `None` is a miss
    pub fn get(&self, id: &NodeId) -> Option<Vec<StructureNode>> {
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(id) {
            if now.saturating_duration_since(entry.stored_at) < self.staleness {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!("cache hit for {}", id);
                return Some(entry.children.clone());
            }
        }

        if self.evict_stale(id, now) {
            debug!("cache entry for {} expired", id);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("cache miss for {}", id);
        None
    }

    /// Remove the entry for `id` only if it is still stale as of `now`
    ///
    /// The staleness check runs under the shard lock, so an entry stored
    /// after the caller's stale read is kept.
    fn evict_stale(&self, id: &NodeId, now: Instant) -> bool {
        self.entries
            .remove_if(id, |_, entry| {
                now.saturating_duration_since(entry.stored_at) >= self.staleness
            })
            .is_some()
    }

    /// Store children for `id`, stamped with the current time
    pub fn put(&self, id: NodeId, children: Vec<StructureNode>) {
        let now = self.clock.now();
        self.put_at(id, children, now);
    }

    /// Store children for `id` with an explicit timestamp; the last write wins
    pub fn put_at(&self, id: NodeId, children: Vec<StructureNode>, stored_at: Instant) {
        debug!("caching {} children for {}", children.len(), id);
        self.entries.insert(
            id,
            CacheEntry {
                children,
                stored_at,
            },
        );
    }

    /// Drop the entry for `id`, returning whether one existed
    pub fn invalidate(&self, id: &NodeId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Drop the entry for `id` and every entry below it
    pub fn invalidate_subtree(&self, id: &NodeId) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key != id && !key.is_descendant_of(id));
        let removed = before.saturating_sub(self.entries.len());
        debug!("invalidated {} cache entries under {}", removed, id);
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones not yet read included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
