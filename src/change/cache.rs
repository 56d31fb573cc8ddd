use super::key::MemoKey;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Storage for solved subproblems consulted by the boosted counter.
///
/// Entries are only ever added. Once a key is present its value is the true
/// way count for that `(amount, tier)` pair and is never replaced.
pub trait WaysCache {
    fn lookup(&mut self, key: MemoKey) -> Option<u64>;

    /// Stores `ways` unless `key` already holds a value. Returns whether it stored.
    fn insert_if_absent(&mut self, key: MemoKey, ways: u64) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single-owner memo table.
#[derive(Debug, Default, Clone)]
pub struct MemoCache {
    entries: HashMap<MemoKey, u64>,
    hits: u64,
    misses: u64,
    inserts: u64,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a value without touching the hit/miss counters.
    pub fn peek(&self, key: MemoKey) -> Option<u64> {
        self.entries.get(&key).copied()
    }

    pub fn contains(&self, key: MemoKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Drops every entry. Needed only if the denomination table changes.
    pub fn clear(&mut self) {
        tracing::trace!(entries = self.entries.len(), "clearing memo cache");
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
        self.inserts = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.entries.len(), self.hits, self.misses, self.inserts)
    }
}

impl WaysCache for MemoCache {
    fn lookup(&mut self, key: MemoKey) -> Option<u64> {
        let found = self.entries.get(&key).copied();
        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    fn insert_if_absent(&mut self, key: MemoKey, ways: u64) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, ways);
        self.inserts += 1;
        true
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Memo table that several threads can fill at once.
///
/// Insertion happens under the write lock, so the first writer for a key
/// wins and later writers leave it alone. Racing writers compute the same
/// value anyway.
#[derive(Debug, Default)]
pub struct SharedMemoCache {
    entries: RwLock<HashMap<MemoKey, u64>>,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
}

impl SharedMemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: MemoKey) -> Option<u64> {
        let found = self.entries.read().get(&key).copied();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, key: MemoKey, ways: u64) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, ways);
        self.inserts.fetch_add(1, Ordering::Relaxed);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write();
        tracing::trace!(entries = entries.len(), "clearing shared memo cache");
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.inserts.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::new(
            self.len(),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.inserts.load(Ordering::Relaxed),
        )
    }
}

impl WaysCache for &SharedMemoCache {
    fn lookup(&mut self, key: MemoKey) -> Option<u64> {
        self.get(key)
    }

    fn insert_if_absent(&mut self, key: MemoKey, ways: u64) -> bool {
        self.insert(key, ways)
    }

    fn len(&self) -> usize {
        SharedMemoCache::len(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    fn new(entries: usize, hits: u64, misses: u64, inserts: u64) -> Self {
        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };
        Self {
            entries,
            hits,
            misses,
            inserts,
            hit_rate,
        }
    }
}
