// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity checks for the entry adapters.
//!
//! Interactive endpoints carry the acting user's email in the payload; it is
//! validated structurally and then trusted, because workflow authorization
//! (who may approve, who may decline) is enforced by the deployment's
//! identity provider in front of this service. The scheduled-job endpoint is
//! the exception: it is gated by a shared bearer token.

use crate::error::ApiError;
use room_book_domain::validate_email;

/// An authenticated interactive caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The caller's email address.
    pub email: String,
}

impl AuthenticatedUser {
    /// Validates and wraps the acting user's email.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the email is empty or
    /// malformed.
    pub fn from_email(email: &str) -> Result<Self, ApiError> {
        validate_email(email).map_err(|err| ApiError::AuthenticationFailed {
            reason: err.to_string(),
        })?;
        Ok(Self {
            email: email.to_string(),
        })
    }
}

/// Verifies the scheduled-job bearer token against the configured secret.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` when no token was presented and
/// `ApiError::Unauthorized` when the presented token does not match.
pub fn verify_scheduler_token(
    expected: &str,
    presented: Option<&str>,
) -> Result<(), ApiError> {
    let Some(token) = presented else {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("missing scheduler token"),
        });
    };
    if token != expected {
        return Err(ApiError::Unauthorized {
            action: String::from("run scheduled jobs"),
        });
    }
    Ok(())
}
