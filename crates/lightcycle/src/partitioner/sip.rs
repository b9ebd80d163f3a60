//! SipHash-1-3 partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::RingKey;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 keyed with `(seed, 0)`.
///
/// Slower than [`XxHash64Partitioner`](super::XxHash64Partitioner) but with a
/// well studied distribution. Bytes are fed raw, without a length prefix, so
/// a `&str` and its `&[u8]` form hash identically.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner;

impl Partitioner for SipPartitioner {
    fn partition(&self, seed: u64, key: &[u8]) -> RingKey {
        let mut hasher = SipHasher13::new_with_keys(seed, 0);
        hasher.write(key);
        RingKey(hasher.finish())
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
