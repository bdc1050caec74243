//! Error types for shadeclip-tables.

use thiserror::Error;

/// Table lookup error.
#[derive(Debug, Error)]
pub enum Error {
    /// Renderer name not recognised.
    #[error("unknown renderer: {0} (expected arnold or prman)")]
    UnknownRenderer(String),
}

/// Result type alias using the tables Error type.
pub type Result<T> = std::result::Result<T, Error>;
