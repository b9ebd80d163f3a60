//! Ring configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default hash seed.
pub const DEFAULT_SEED: u64 = 0xcafe_d00d;

/// Default rebalance threshold, and default replica count when none is given.
pub const DEFAULT_SIZE: usize = 128;

/// Construction parameters for a [`Lightcycle`](crate::Lightcycle).
///
/// Missing fields take their defaults, so `{}` is a valid config.
///
/// ```
/// use lightcycle::RingConfig;
///
/// let config = RingConfig::from_json(r#"{ "size": 10, "replicas": 3 }"#).unwrap();
/// assert_eq!(config.effective_replicas(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingConfig {
    /// Seed handed to the partitioner for every hash.
    pub seed: u64,
    /// Number of distinct ids the ring holds before it rebalances.
    pub size: usize,
    /// Virtual nodes per id. Defaults to `size`.
    pub replicas: Option<usize>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            size: DEFAULT_SIZE,
            replicas: None,
        }
    }
}

impl RingConfig {
    /// Parses a JSON config. Any parse failure, including a negative
    /// `size`, is reported as [`Error::Configuration`].
    pub fn from_json(text: &str) -> Result<Self> {
        let config: RingConfig =
            serde_json::from_str(text).map_err(|e| Error::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::Configuration(
                "size must be a positive integer".to_string(),
            ));
        }
        if self.replicas == Some(0) {
            return Err(Error::Configuration(
                "replicas must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Replica count after defaulting to `size`.
    pub fn effective_replicas(&self) -> usize {
        self.replicas.unwrap_or(self.size)
    }
}
