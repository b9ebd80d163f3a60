//! Ring key type.
//!
//! Every position on the ring is a 64-bit digest. Keys order numerically,
//! which is the same order as their canonical text form: sixteen lowercase,
//! zero-padded hex digits.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Width of the canonical hex rendering of a [`RingKey`].
pub const KEY_HEX_WIDTH: usize = 16;

/// A position on the ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct RingKey(pub u64);

impl RingKey {
    /// Parses a key from 1 to 16 hex digits.
    ///
    /// Shorter inputs are treated as if left-padded with zeros, so `"a"` and
    /// `"000000000000000a"` name the same position.
    pub fn from_hex(text: &str) -> Result<Self> {
        if text.is_empty() || text.len() > KEY_HEX_WIDTH {
            return Err(Error::InvalidToken(format!(
                "expected 1 to {} hex digits, got {:?}",
                KEY_HEX_WIDTH, text
            )));
        }
        u64::from_str_radix(text, 16)
            .map(RingKey)
            .map_err(|e| Error::InvalidToken(format!("{:?}: {}", text, e)))
    }

    /// Canonical fixed-width rendering.
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for RingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for RingKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RingKey::from_hex(s)
    }
}

impl From<u64> for RingKey {
    fn from(value: u64) -> Self {
        RingKey(value)
    }
}
