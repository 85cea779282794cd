//! Domain-level error types.

use std::path::PathBuf;

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: u64 },

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// A post document could not be turned into a [`Post`](crate::domain::Post).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("unexpected document shape: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unparseable timestamp `{0}`")]
    InvalidTimestamp(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {file}: {source}")]
    MalformedDocument {
        file: String,
        #[source]
        source: DocumentError,
    },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Duplicate id {0}")]
    DuplicateId(u64),

    #[error("Id {0} is outside the assignable range")]
    IdOutOfRange(u64),
}

impl RepoError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
