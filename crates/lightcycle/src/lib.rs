//! In-memory consistent hash ring.
//!
//! This crate maps arbitrary keys onto a dynamic set of named resources:
//! - Seeded, pluggable hashing into a 64-bit key space
//! - Virtual nodes (replicas) per resource with a per-id key cache
//! - Successor lookup with wraparound
//! - Automatic rebalancing once membership outgrows the configured size
//!
//! ```
//! use lightcycle::{Lightcycle, RingConfig};
//! use std::sync::Arc;
//!
//! let mut ring = Lightcycle::new(RingConfig::default()).unwrap();
//! ring.add(Arc::new("shard-1"), "shard-1").unwrap();
//! assert_eq!(*ring.locate("some key").unwrap(), "shard-1");
//! ```

pub mod config;
pub mod error;
pub mod partitioner;
pub mod ring;
pub mod shared;
pub mod token;

pub use config::{RingConfig, DEFAULT_SEED, DEFAULT_SIZE};
pub use error::{Error, Result};
pub use partitioner::{Partitioner, SipPartitioner, XxHash64Partitioner};
pub use ring::{Lightcycle, RingBuilder, RingStore, REPLICAS_PAD, SIZE_PAD};
pub use shared::SharedRing;
pub use token::RingKey;
