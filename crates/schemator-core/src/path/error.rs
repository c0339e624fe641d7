//! Error types for path parsing and traversal
//!
//! Every traversal error names the segment that failed and the segments
//! traveled before it, so messages point at the exact spot in the path.

use crate::error::ErrorKind;
use thiserror::Error;

/// Path-level errors raised by the parser and the nested accessor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The raw path has an unusable shape
    #[error("Invalid path: {message}")]
    InvalidPath {
        message: String,
        path: String,
    },

    /// The root handed to the accessor is a scalar
    #[error("Source is scalar: expected a container, found {found}")]
    SourceIsScalar {
        found: &'static str,
    },

    /// A key along the path is missing
    #[error("Key '{key}' does not exist at '{traveled}'")]
    PathNotExist {
        key: String,
        traveled: String,
    },

    /// A fan-out, flatten or append met a value it cannot iterate
    #[error("Value at '{traveled}' is not array accessible (found {found})")]
    PathNotArrayAccessible {
        traveled: String,
        found: &'static str,
    },

    /// The write target cannot be set or removed
    #[error("Key '{key}' at '{traveled}' is not writable: {reason}")]
    PathNotWritable {
        key: String,
        traveled: String,
        reason: String,
    },
}

impl PathError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::InvalidPath { .. } => ErrorKind::InvalidPath,
            PathError::SourceIsScalar { .. } => ErrorKind::SourceIsScalar,
            PathError::PathNotExist { .. } => ErrorKind::PathNotExist,
            PathError::PathNotArrayAccessible { .. } => ErrorKind::PathNotArrayAccessible,
            PathError::PathNotWritable { .. } => ErrorKind::PathNotWritable,
        }
    }

    pub fn invalid_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn not_exist(key: impl Into<String>, traveled: impl Into<String>) -> Self {
        Self::PathNotExist {
            key: key.into(),
            traveled: traveled.into(),
        }
    }

    pub fn not_writable(
        key: impl Into<String>,
        traveled: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PathNotWritable {
            key: key.into(),
            traveled: traveled.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for path operations
pub type PathResult<T> = std::result::Result<T, PathError>;
