//! Error types for interchange document reading and writing.

use thiserror::Error;

/// Errors that can occur when reading, writing or validating a document.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// An element is missing a required attribute.
    #[error("<{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An element appeared where it is not allowed.
    #[error("unexpected element <{found}> inside <{parent}>")]
    UnexpectedElement { parent: String, found: String },

    /// A parameter carries an unknown kind.
    #[error("unknown parameter kind '{0}'")]
    UnknownKind(String),

    /// A numeric attribute could not be parsed.
    #[error("invalid number '{value}' in attribute '{attribute}'")]
    InvalidNumber { attribute: &'static str, value: String },

    /// Two nodes share an id.
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    /// A connection names a node id that is not in the document.
    #[error("connection {connection} references missing node '{id}'")]
    DanglingReference { connection: String, id: String },
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
