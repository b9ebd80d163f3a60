//! Builder for [`Lightcycle`] rings.

use crate::config::RingConfig;
use crate::error::Result;
use crate::partitioner::{Partitioner, XxHash64Partitioner};
use crate::ring::cycle::Lightcycle;

/// Fluent constructor for a [`Lightcycle`].
///
/// ```
/// use lightcycle::{Lightcycle, RingBuilder, SipPartitioner};
///
/// let ring: Lightcycle<String, SipPartitioner> = RingBuilder::new()
///     .seed(0xdeadbeef)
///     .size(10)
///     .replicas(3)
///     .partitioner(SipPartitioner)
///     .build()
///     .unwrap();
/// assert_eq!(ring.replicas(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<P = XxHash64Partitioner> {
    config: RingConfig,
    partitioner: P,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            config: RingConfig::default(),
            partitioner: XxHash64Partitioner,
        }
    }
}

impl<P: Partitioner> RingBuilder<P> {
    /// Replaces every setting with `config`.
    pub fn config(mut self, config: RingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.config.size = size;
        self
    }

    pub fn replicas(mut self, replicas: usize) -> Self {
        self.config.replicas = Some(replicas);
        self
    }

    /// Swaps the hash function.
    pub fn partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<Q> {
        RingBuilder {
            config: self.config,
            partitioner,
        }
    }

    /// Validates the settings and builds the ring.
    pub fn build<R>(self) -> Result<Lightcycle<R, P>> {
        Lightcycle::with_partitioner(self.config, self.partitioner)
    }
}
