// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use room_book_domain::DomainError;
use room_book_persistence::PersistenceError;

/// Errors returned by entry adapters.
///
/// Each variant maps to one HTTP status class at the server boundary; the
/// adapters themselves never see status codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller could not be authenticated.
    AuthenticationFailed {
        /// Why authentication failed.
        reason: String,
    },
    /// The caller is authenticated but not allowed to perform the action.
    Unauthorized {
        /// The action that was refused.
        action: String,
    },
    /// A request payload field failed validation.
    InvalidInput {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
    /// The addressed booking or related resource does not exist.
    ResourceNotFound {
        /// The resource kind, e.g. "booking".
        resource_type: String,
        /// The lookup that missed.
        message: String,
    },
    /// A fatal side effect or storage operation failed.
    Internal {
        /// Operator-facing description.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action } => write!(f, "Not authorized to {action}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Wraps a validation failure for a named payload field.
    #[must_use]
    pub fn invalid(field: &str, err: &DomainError) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::BookingNotFound(_)
            | PersistenceError::CalendarEventNotFound(_)
            | PersistenceError::NotFound(_) => Self::ResourceNotFound {
                resource_type: String::from("booking"),
                message: err.to_string(),
            },
            _ => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}
