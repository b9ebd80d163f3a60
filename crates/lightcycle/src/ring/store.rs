//! Ordered ring storage.
//!
//! Holds `RingKey -> V` pairs in key order and answers successor queries
//! with wraparound. Lookups are O(log n).

use crate::token::RingKey;
use std::collections::BTreeMap;

/// Ordered container of ring positions.
#[derive(Debug, Clone)]
pub struct RingStore<V> {
    entries: BTreeMap<RingKey, V>,
    capacity_hint: usize,
}

impl<V> Default for RingStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RingStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty store sized for roughly `capacity_hint` keys.
    ///
    /// `BTreeMap` cannot preallocate, so the hint is only recorded for
    /// diagnostics (the rebalance log reports it); the store grows freely.
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity_hint,
        }
    }

    /// Inserts or overwrites the value at `key`, returning the previous one.
    pub fn insert(&mut self, key: RingKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Removes the value at `key`. Absent keys are ignored.
    pub fn remove(&mut self, key: &RingKey) -> Option<V> {
        self.entries.remove(key)
    }

    /// Returns the pair with the smallest key `>= key`, wrapping to the
    /// smallest key overall. `None` only when the store is empty.
    pub fn successor(&self, key: &RingKey) -> Option<(&RingKey, &V)> {
        self.entries
            .range(key..)
            .next()
            .or_else(|| self.entries.iter().next())
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &RingKey) -> Option<&V> {
        self.entries.get(key)
    }

    /// The pair with the smallest key.
    pub fn first(&self) -> Option<(&RingKey, &V)> {
        self.entries.iter().next()
    }

    /// All pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&RingKey, &V)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }
}
