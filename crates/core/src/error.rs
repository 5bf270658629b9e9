// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for issue store operations.
//!
//! The `Display` output of every variant is the exact message returned to
//! clients in the `error` field of a response body.

use thiserror::Error;

/// All logical failures an [`IssueStore`](crate::IssueStore) operation can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("required field(s) missing")]
    MissingRequiredFields,

    #[error("missing _id")]
    MissingId,

    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },

    #[error("could not update")]
    CouldNotUpdate { id: String },

    #[error("could not delete")]
    CouldNotDelete { id: String },
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input was absent or empty.
    Validation,
    /// The request was well formed but no record matched it.
    NotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingRequiredFields | Error::MissingId | Error::NoUpdateFields { .. } => {
                ErrorKind::Validation
            }
            Error::CouldNotUpdate { .. } | Error::CouldNotDelete { .. } => ErrorKind::NotFound,
        }
    }

    /// The `_id` echoed back alongside the message, when the failure has one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Error::MissingRequiredFields | Error::MissingId => None,
            Error::NoUpdateFields { id }
            | Error::CouldNotUpdate { id }
            | Error::CouldNotDelete { id } => Some(id),
        }
    }
}

/// A specialized Result type for issue store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
