//! Error types for the ring.

/// Result type alias for the ring.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or mutating a ring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid ring configuration (size, replica count, malformed config text).
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// Invalid argument passed to a ring operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Malformed textual ring key.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
