// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payload field validation.
//!
//! Adapters validate before any event is dispatched; the lifecycle machine
//! itself never rejects. A validation failure here means no state mutation
//! occurred anywhere.

use crate::error::DomainError;
use chrono::{DateTime, Utc};

/// Maximum accepted booking title length.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validates an actor email field.
///
/// This is a structural check (non-empty, contains a single `@` with
/// non-empty sides), not a deliverability check.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the field is empty or malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "email cannot be empty",
        )));
    }
    let mut parts = email.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid address"
        )));
    }
    Ok(())
}

/// Validates the reserved interval.
///
/// # Errors
///
/// Returns `DomainError::InvalidInterval` if the end does not fall strictly
/// after the start.
pub fn validate_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::InvalidInterval {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }
    Ok(())
}

/// Validates a booking title.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the title is empty, whitespace
/// only, or exceeds [`MAX_TITLE_LENGTH`].
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "title cannot be empty",
        )));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "title exceeds {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}
