//! Error types for the Schemator core library
//!
//! This module defines the error handling system for Schemator. Each layer
//! has its own `thiserror` enum ([`AccessError`] for container access,
//! [`PathError`] for path traversal) and everything converges into the
//! crate-level [`Error`], which also carries the conversion-level failures.
//! Every error exposes a machine-checkable [`ErrorKind`].

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::access::AccessError;
pub use crate::path::PathError;

use crate::value::Value;

/// Main error type for Schemator operations
#[derive(Error, Debug)]
pub enum Error {
    /// Container-level access failure
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Path parsing or traversal failure
    #[error(transparent)]
    Path(#[from] PathError),

    /// The value handed to the converter cannot be read with a path
    #[error("Unsupported source type: {found}")]
    UnsupportedSourceType {
        found: &'static str,
    },

    /// A schema source specification has a shape the converter does not understand
    #[error("Unsupported key type: {found} ({key})")]
    UnsupportedKeyType {
        found: &'static str,
        key: Value,
    },

    /// A filter step inside a pipeline is malformed
    #[error("Unsupported filter config: {message} ({config})")]
    UnsupportedFilterConfigType {
        message: String,
        config: Value,
    },

    /// A pipeline names a filter that was never registered
    #[error("Filter '{name}' not found")]
    FilterNotFound {
        name: String,
    },

    /// A filter body failed
    #[error("Filter '{filter}' failed: {message}")]
    Filter {
        filter: String,
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// Path resolution against the source failed
    #[error("Cannot get value by key '{key}': {cause}")]
    CannotGetValue {
        key: String,
        source_data: Value,
        #[source]
        cause: PathError,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Machine-checkable classification of every error the library can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidPath,
    SourceIsScalar,
    PathNotExist,
    PathNotArrayAccessible,
    PathNotWritable,
    UnsupportedContainerType,
    NotWritable,
    UnsupportedSourceType,
    UnsupportedKeyType,
    UnsupportedFilterConfigType,
    FilterNotFound,
    FilterError,
    CannotGetValue,
}

impl Error {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Access(err) => err.kind(),
            Error::Path(err) => err.kind(),
            Error::UnsupportedSourceType { .. } => ErrorKind::UnsupportedSourceType,
            Error::UnsupportedKeyType { .. } => ErrorKind::UnsupportedKeyType,
            Error::UnsupportedFilterConfigType { .. } => ErrorKind::UnsupportedFilterConfigType,
            Error::FilterNotFound { .. } => ErrorKind::FilterNotFound,
            Error::Filter { .. } => ErrorKind::FilterError,
            Error::CannotGetValue { .. } => ErrorKind::CannotGetValue,
        }
    }

    /// The path-level error underneath this one, if any
    pub fn path_error(&self) -> Option<&PathError> {
        match self {
            Error::Path(err) => Some(err),
            Error::CannotGetValue { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Whether non-strict mode may turn this error into a `null` result
    pub fn is_suppressible(&self) -> bool {
        !matches!(self.kind(), ErrorKind::FilterNotFound)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidPath => "InvalidPath",
            ErrorKind::SourceIsScalar => "SourceIsScalar",
            ErrorKind::PathNotExist => "PathNotExist",
            ErrorKind::PathNotArrayAccessible => "PathNotArrayAccessible",
            ErrorKind::PathNotWritable => "PathNotWritable",
            ErrorKind::UnsupportedContainerType => "UnsupportedContainerType",
            ErrorKind::NotWritable => "NotWritable",
            ErrorKind::UnsupportedSourceType => "UnsupportedSourceType",
            ErrorKind::UnsupportedKeyType => "UnsupportedKeyType",
            ErrorKind::UnsupportedFilterConfigType => "UnsupportedFilterConfigType",
            ErrorKind::FilterNotFound => "FilterNotFound",
            ErrorKind::FilterError => "FilterError",
            ErrorKind::CannotGetValue => "CannotGetValue",
        };
        f.write_str(name)
    }
}
