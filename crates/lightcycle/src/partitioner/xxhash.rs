//! XXH64 partitioner, the ring default.

use crate::partitioner::traits::Partitioner;
use crate::token::RingKey;
use xxhash_rust::xxh64::xxh64;

/// Seeded XXH64 over the raw key bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct XxHash64Partitioner;

impl Partitioner for XxHash64Partitioner {
    #[inline]
    fn partition(&self, seed: u64, key: &[u8]) -> RingKey {
        RingKey(xxh64(key, seed))
    }

    fn name(&self) -> &'static str {
        "XxHash64Partitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let p = XxHash64Partitioner;
        assert_eq!(p.partition(0xcafed00d, b"kiwi0"), p.partition(0xcafed00d, b"kiwi0"));
    }

    #[test]
    fn test_seed_changes_position() {
        let p = XxHash64Partitioner;
        assert_ne!(p.partition(0xcafed00d, b"kiwi"), p.partition(0xdeadbeef, b"kiwi"));
    }

    #[test]
    fn test_known_vector() {
        // Reference XXH64 digest of the empty input with seed 0.
        let p = XxHash64Partitioner;
        assert_eq!(p.partition(0, b""), RingKey(0xef46db3751d8e999));
    }
}
