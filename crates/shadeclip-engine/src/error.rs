//! Error types for network copies.

use thiserror::Error;

/// Fatal errors that abort a copy.
#[derive(Debug, Error)]
pub enum Error {
    /// Scene access error, including an unresolved root.
    #[error("{0}")]
    Scene(#[from] shadeclip_common::Error),

    /// Document writing error.
    #[error("{0}")]
    Xml(#[from] shadeclip_xml::Error),

    /// A copy was requested without any root node.
    #[error("no root nodes given")]
    NoRoots,
}

/// Result type for copy operations.
pub type Result<T> = std::result::Result<T, Error>;
