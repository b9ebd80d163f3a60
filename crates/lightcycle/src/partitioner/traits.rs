//! Core partitioner trait definitions.

use crate::token::RingKey;

/// A partitioner converts keys into ring positions.
///
/// Implementations must be deterministic: the same `(seed, key)` always
/// yields the same [`RingKey`]. Distribution should be roughly uniform;
/// no cryptographic properties are required.
pub trait Partitioner: Send + Sync + 'static {
    /// Hashes `key` under `seed` into a ring position.
    fn partition(&self, seed: u64, key: &[u8]) -> RingKey;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
