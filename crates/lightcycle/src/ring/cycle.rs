//! The ring controller.
//!
//! [`Lightcycle`] owns the id registry, the per-id replica key cache and the
//! [`RingStore`]. Each id is placed on the ring `replicas` times, at
//! `hash(seed, id || index)`. A lookup hashes its key once and takes the
//! clockwise successor.
//!
//! When the number of ids grows past `size`, the ring rebuilds itself with
//! `size = ids + SIZE_PAD` and `replicas = ids + REPLICAS_PAD`.

use crate::config::RingConfig;
use crate::error::{Error, Result};
use crate::partitioner::{Partitioner, XxHash64Partitioner};
use crate::ring::store::RingStore;
use crate::token::RingKey;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Headroom added to `size` on rebalance.
pub const SIZE_PAD: usize = 16;

/// Headroom added to `replicas` on rebalance.
pub const REPLICAS_PAD: usize = 8;

/// Extra capacity hinted to the first store.
const INITIAL_STORE_PAD: usize = 16;

/// Consistent hash ring mapping keys to caller-owned resources.
///
/// Not synchronized. Wrap it in [`SharedRing`](crate::SharedRing) (or your
/// own lock) to share it between threads.
///
/// ```
/// use lightcycle::{Lightcycle, RingConfig};
/// use std::sync::Arc;
///
/// let mut ring = Lightcycle::new(RingConfig { size: 10, replicas: Some(3), ..Default::default() }).unwrap();
/// ring.add(Arc::new("10.0.0.1:11211"), "cache-a").unwrap();
/// ring.add(Arc::new("10.0.0.2:11211"), "cache-b").unwrap();
///
/// let owner = ring.locate("user:42").unwrap();
/// assert!(*owner == "10.0.0.1:11211" || *owner == "10.0.0.2:11211");
/// ```
#[derive(Debug)]
pub struct Lightcycle<R, P = XxHash64Partitioner> {
    seed: u64,
    size: usize,
    replicas: usize,
    partitioner: P,
    entries: BTreeMap<String, Arc<R>>,
    cache: HashMap<String, Vec<RingKey>>,
    store: RingStore<Arc<R>>,
}

impl<R> Lightcycle<R> {
    /// Builds a ring using the default XXH64 partitioner.
    pub fn new(config: RingConfig) -> Result<Self> {
        Self::with_partitioner(config, XxHash64Partitioner)
    }
}

impl<R, P: Partitioner> Lightcycle<R, P> {
    /// Builds a ring that hashes with `partitioner`.
    pub fn with_partitioner(config: RingConfig, partitioner: P) -> Result<Self> {
        config.validate()?;
        let size = config.size;
        let replicas = config.effective_replicas();

        Ok(Self {
            seed: config.seed,
            size,
            replicas,
            partitioner,
            entries: BTreeMap::new(),
            cache: HashMap::new(),
            store: RingStore::with_capacity(
                size.saturating_mul(replicas).saturating_add(INITIAL_STORE_PAD),
            ),
        })
    }

    /// Registers `resource` under `id` and places its replicas.
    ///
    /// Adding the same id again reuses its cached keys, so the store does
    /// not grow; a different resource under the same id takes over those
    /// positions. May trigger [`rebalance`](Self::rebalance) before returning.
    pub fn add(&mut self, resource: Arc<R>, id: &str) -> Result<()> {
        validate_id(id)?;
        self.place(resource, id);
        debug!(
            id,
            keys = self.replica_keys(id).map_or(0, |keys| keys.len()),
            ring_keys = self.store.len(),
            "added to ring"
        );
        metrics::gauge!("lightcycle_ring_keys").set(self.store.len() as f64);

        if self.entries.len() > self.size {
            self.rebalance();
        }
        Ok(())
    }

    /// Removes `id` and all of its replica keys.
    ///
    /// Unknown ids are ignored. Returns the removed resource, if any.
    pub fn remove(&mut self, id: &str) -> Result<Option<Arc<R>>> {
        validate_id(id)?;
        let Some(keys) = self.cache.remove(id) else {
            return Ok(None);
        };

        for key in &keys {
            self.store.remove(key);
        }
        let removed = self.entries.remove(id);

        debug!(id, removed_keys = keys.len(), ring_keys = self.store.len(), "removed from ring");
        metrics::gauge!("lightcycle_ring_keys").set(self.store.len() as f64);
        Ok(removed)
    }

    /// Finds the resource owning `key`, or `None` on an empty ring.
    ///
    /// Only the bytes matter: `"abc"`, `b"abc"` and `vec![97, 98, 99]`
    /// resolve to the same resource.
    pub fn locate(&self, key: impl AsRef<[u8]>) -> Option<Arc<R>> {
        let hashed = self.hash(key);
        let (position, resource) = self.store.successor(&hashed)?;
        trace!(%hashed, %position, "located key");
        Some(Arc::clone(resource))
    }

    /// Read-only view of every registered id and its resource.
    pub fn all(&self) -> &BTreeMap<String, Arc<R>> {
        &self.entries
    }

    /// Rebuilds the ring sized for the current membership.
    ///
    /// Sets `size = ids + SIZE_PAD` and `replicas = ids + REPLICAS_PAD`, then
    /// places every id again on a fresh store.
    pub fn rebalance(&mut self) {
        let count = self.entries.len();
        self.size = count + SIZE_PAD;
        self.replicas = count + REPLICAS_PAD;
        self.store = RingStore::with_capacity(self.size.saturating_mul(self.replicas));

        for keys in self.cache.values_mut() {
            keys.truncate(self.replicas);
        }
        for (id, resource) in std::mem::take(&mut self.entries) {
            self.place(resource, &id);
        }

        info!(
            entries = count,
            size = self.size,
            replicas = self.replicas,
            ring_keys = self.store.len(),
            capacity_hint = self.store.capacity_hint(),
            "rebalanced ring"
        );
        metrics::counter!("lightcycle_rebalances_total").increment(1);
        metrics::gauge!("lightcycle_ring_keys").set(self.store.len() as f64);
    }

    /// Changes the replica count used by later adds, without rebalancing.
    ///
    /// Ids already on the ring keep their current key count until the ring
    /// rebalances. Adding such an id again grows its keys up to the new
    /// count but never drops any, and repoints all of them at the new
    /// resource. `key_count()` can differ from `len() * replicas()` in between.
    pub fn set_replicas(&mut self, replicas: usize) -> Result<()> {
        if replicas == 0 {
            return Err(Error::Configuration(
                "replicas must be a positive integer".to_string(),
            ));
        }
        self.replicas = replicas;
        Ok(())
    }

    /// Hashes a lookup key into its ring position.
    pub fn hash(&self, key: impl AsRef<[u8]>) -> RingKey {
        self.partitioner.partition(self.seed, key.as_ref())
    }

    /// Seed handed to the partitioner.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current rebalance threshold.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current replica count for newly placed ids.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no id is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Resource registered under `id`.
    pub fn get(&self, id: &str) -> Option<&Arc<R>> {
        self.entries.get(id)
    }

    /// Number of positions on the ring.
    pub fn key_count(&self) -> usize {
        self.store.len()
    }

    /// Cached replica keys for `id`, in index order.
    pub fn replica_keys(&self, id: &str) -> Option<&[RingKey]> {
        self.cache.get(id).map(Vec::as_slice)
    }

    /// Read-only access to the ring positions.
    pub fn store(&self) -> &RingStore<Arc<R>> {
        &self.store
    }

    /// Hash function used for placement and lookup.
    pub fn partitioner(&self) -> &P {
        &self.partitioner
    }

    // Points every cached key of `id` at `resource`, hashing only indexes
    // below `replicas` that are not cached yet.
    fn place(&mut self, resource: Arc<R>, id: &str) {
        let keys = self.cache.entry(id.to_string()).or_default();
        for index in keys.len()..self.replicas {
            let key = self
                .partitioner
                .partition(self.seed, format!("{}{}", id, index).as_bytes());
            keys.push(key);
        }

        for key in keys.iter() {
            self.store.insert(*key, Arc::clone(&resource));
        }
        self.entries.insert(id.to_string(), resource);
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidArgument(
            "id must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts hash calls so cache reuse is observable.
    #[derive(Debug, Default, Clone)]
    struct CountingPartitioner {
        calls: Arc<AtomicUsize>,
    }

    impl Partitioner for CountingPartitioner {
        fn partition(&self, seed: u64, key: &[u8]) -> RingKey {
            self.calls.fetch_add(1, Ordering::SeqCst);
            XxHash64Partitioner.partition(seed, key)
        }

        fn name(&self) -> &'static str {
            "CountingPartitioner"
        }
    }

    fn config(size: usize, replicas: usize) -> RingConfig {
        RingConfig {
            size,
            replicas: Some(replicas),
            ..RingConfig::default()
        }
    }

    #[test]
    fn test_wraparound_returns_minimum_key() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(RingConfig::default()).unwrap();
        let durian = Arc::new("durian");
        let gooseberry = Arc::new("gooseberry");

        ring.store.insert(RingKey::from_hex("a").unwrap(), Arc::clone(&durian));
        ring.store.insert(RingKey::from_hex("b").unwrap(), Arc::clone(&gooseberry));

        let hashed = ring.hash("pomegranate");
        assert!(hashed > RingKey(0xb));
        assert!(Arc::ptr_eq(&ring.locate("pomegranate").unwrap(), &durian));
    }

    #[test]
    fn test_readd_reuses_cached_keys() {
        let partitioner = CountingPartitioner::default();
        let calls = Arc::clone(&partitioner.calls);
        let mut ring: Lightcycle<&str, _> =
            Lightcycle::with_partitioner(config(10, 3), partitioner).unwrap();

        ring.add(Arc::new("kiwi"), "kiwi").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        ring.add(Arc::new("kiwi"), "kiwi").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(ring.key_count(), 3);
    }

    #[test]
    fn test_replace_resource_keeps_positions() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(config(10, 3)).unwrap();
        ring.add(Arc::new("old"), "kiwi").unwrap();
        let before = ring.replica_keys("kiwi").unwrap().to_vec();

        ring.add(Arc::new("new"), "kiwi").unwrap();
        assert_eq!(ring.replica_keys("kiwi").unwrap(), before.as_slice());
        assert_eq!(ring.key_count(), 3);
        for key in &before {
            assert_eq!(**ring.store().get(key).unwrap(), "new");
        }
    }

    #[test]
    fn test_set_replicas_does_not_touch_cached_ids() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(config(10, 3)).unwrap();
        ring.add(Arc::new("kiwi"), "kiwi").unwrap();

        ring.set_replicas(5).unwrap();
        ring.add(Arc::new("papaya"), "papaya").unwrap();

        // kiwi keeps 3 keys, papaya gets 5.
        assert_eq!(ring.replica_keys("kiwi").unwrap().len(), 3);
        assert_eq!(ring.replica_keys("papaya").unwrap().len(), 5);
        assert_eq!(ring.key_count(), 8);
        assert_ne!(ring.key_count(), ring.len() * ring.replicas());

        ring.rebalance();
        assert_eq!(ring.key_count(), ring.len() * ring.replicas());
    }

    #[test]
    fn test_readd_after_shrink_repoints_every_key() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(config(10, 3)).unwrap();
        let old = Arc::new("old");
        let new = Arc::new("new");
        ring.add(Arc::clone(&old), "kiwi").unwrap();

        ring.set_replicas(1).unwrap();
        ring.add(Arc::clone(&new), "kiwi").unwrap();

        // kiwi keeps all 3 keys until the next rebalance, all on the new resource.
        assert_eq!(ring.replica_keys("kiwi").unwrap().len(), 3);
        assert_eq!(ring.key_count(), 3);
        assert!(Arc::ptr_eq(ring.get("kiwi").unwrap(), &new));
        for replica in ["kiwi0", "kiwi1", "kiwi2"] {
            assert!(Arc::ptr_eq(&ring.locate(replica).unwrap(), &new));
        }
        for key in ring.replica_keys("kiwi").unwrap() {
            assert!(Arc::ptr_eq(ring.store().get(key).unwrap(), &new));
        }
    }

    #[test]
    fn test_set_replicas_rejects_zero() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(config(10, 3)).unwrap();
        assert!(matches!(ring.set_replicas(0), Err(Error::Configuration(_))));
        assert_eq!(ring.replicas(), 3);
    }

    #[test]
    fn test_rebalance_shrinks_cached_keys() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(config(1, 40)).unwrap();
        ring.add(Arc::new("a"), "a").unwrap();
        ring.add(Arc::new("b"), "b").unwrap();

        // Two ids crossed size 1: replicas drop from 40 to 2 + REPLICAS_PAD.
        assert_eq!(ring.replicas(), 2 + REPLICAS_PAD);
        assert_eq!(ring.replica_keys("a").unwrap().len(), 2 + REPLICAS_PAD);
        assert_eq!(ring.key_count(), 2 * (2 + REPLICAS_PAD));

        ring.remove("a").unwrap();
        assert_eq!(ring.key_count(), 2 + REPLICAS_PAD);
    }

    #[test]
    fn test_rebalance_on_empty_ring() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(RingConfig::default()).unwrap();
        ring.rebalance();
        assert_eq!(ring.size(), SIZE_PAD);
        assert_eq!(ring.replicas(), REPLICAS_PAD);
        assert!(ring.locate("anything").is_none());
    }

    #[test]
    fn test_initial_capacity_hint() {
        let ring: Lightcycle<&str> = Lightcycle::new(config(10, 3)).unwrap();
        assert_eq!(ring.store().capacity_hint(), 10 * 3 + INITIAL_STORE_PAD);
    }

    #[test]
    fn test_empty_id_rejected_before_mutation() {
        let mut ring: Lightcycle<&str> = Lightcycle::new(config(10, 3)).unwrap();
        assert!(matches!(
            ring.add(Arc::new("nameless"), ""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(ring.remove(""), Err(Error::InvalidArgument(_))));
        assert_eq!(ring.key_count(), 0);
        assert!(ring.is_empty());
    }
}
