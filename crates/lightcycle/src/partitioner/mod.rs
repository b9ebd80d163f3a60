//! Partitioner abstraction for the ring.
//!
//! Partitioners turn a seed and an arbitrary byte sequence into a
//! [`RingKey`](crate::token::RingKey). The same partitioner places replica
//! keys and hashes lookup keys, so both live in one key space.

pub mod sip;
pub mod traits;
pub mod xxhash;

pub use sip::SipPartitioner;
pub use traits::Partitioner;
pub use xxhash::XxHash64Partitioner;
