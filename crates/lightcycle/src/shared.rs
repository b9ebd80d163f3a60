//! Thread-shareable ring.
//!
//! [`Lightcycle`] itself does no locking. `SharedRing` puts it behind a
//! reader/writer lock: lookups share the read side, membership changes
//! take the write side, so a lookup never observes a store mid-rebuild.

use crate::config::RingConfig;
use crate::error::Result;
use crate::partitioner::{Partitioner, XxHash64Partitioner};
use crate::ring::Lightcycle;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A [`Lightcycle`] behind a `parking_lot::RwLock`.
#[derive(Debug)]
pub struct SharedRing<R, P = XxHash64Partitioner> {
    inner: RwLock<Lightcycle<R, P>>,
}

impl<R> SharedRing<R> {
    pub fn new(config: RingConfig) -> Result<Self> {
        Ok(Self::from_ring(Lightcycle::new(config)?))
    }
}

impl<R, P: Partitioner> SharedRing<R, P> {
    pub fn from_ring(ring: Lightcycle<R, P>) -> Self {
        Self {
            inner: RwLock::new(ring),
        }
    }

    pub fn add(&self, resource: Arc<R>, id: &str) -> Result<()> {
        self.inner.write().add(resource, id)
    }

    pub fn remove(&self, id: &str) -> Result<Option<Arc<R>>> {
        self.inner.write().remove(id)
    }

    pub fn rebalance(&self) {
        self.inner.write().rebalance()
    }

    pub fn set_replicas(&self, replicas: usize) -> Result<()> {
        self.inner.write().set_replicas(replicas)
    }

    pub fn locate(&self, key: impl AsRef<[u8]>) -> Option<Arc<R>> {
        self.inner.read().locate(key)
    }

    /// Snapshot of the registry, taken under the read lock.
    pub fn all(&self) -> BTreeMap<String, Arc<R>> {
        self.inner.read().all().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn key_count(&self) -> usize {
        self.inner.read().key_count()
    }

    /// Holds the read lock for several queries against one ring state.
    pub fn read(&self) -> RwLockReadGuard<'_, Lightcycle<R, P>> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Lightcycle<R, P>> {
        self.inner.write()
    }

    pub fn into_inner(self) -> Lightcycle<R, P> {
        self.inner.into_inner()
    }
}
