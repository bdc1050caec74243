//! Error types for shadeclip-common.

use thiserror::Error;

/// Common error type for shadeclip operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A node name could not be resolved in the source scene.
    #[error("node not found in scene: {0}")]
    NotFound(String),

    /// The scene snapshot could not be decoded.
    #[error("invalid scene snapshot: {0}")]
    Scene(String),

    /// Two nodes in one scene share a name.
    #[error("duplicate node name in scene: {0}")]
    DuplicateNode(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
