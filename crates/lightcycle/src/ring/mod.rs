//! Consistent hash ring implementation.
//!
//! The ring manages replica positions and provides lookup of the resource
//! responsible for a key.

pub mod builder;
pub mod cycle;
pub mod store;

pub use builder::RingBuilder;
pub use cycle::{Lightcycle, REPLICAS_PAD, SIZE_PAD};
pub use store::RingStore;
