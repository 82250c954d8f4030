// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The service category string is not one of the fixed set.
    InvalidServiceCategory(String),
    /// The service action string is not approve/decline/closeout.
    InvalidServiceAction(String),
    /// The status string is not a valid booking status label.
    InvalidStatus(String),
    /// The transition event type string is not recognized.
    InvalidEventType(String),
    /// An email field is empty or malformed.
    InvalidEmail(String),
    /// The reserved interval is empty or inverted.
    InvalidInterval {
        /// The interval start (RFC 3339).
        start: String,
        /// The interval end (RFC 3339).
        end: String,
    },
    /// The booking title is empty or too long.
    InvalidTitle(String),
    /// A booking must reserve at least one room.
    NoRoomsSelected,
    /// The tenant identifier is empty.
    InvalidTenant(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidServiceCategory(s) => {
                write!(f, "Invalid service category: '{s}'")
            }
            Self::InvalidServiceAction(s) => write!(f, "Invalid service action: '{s}'"),
            Self::InvalidStatus(s) => write!(f, "Invalid booking status: '{s}'"),
            Self::InvalidEventType(s) => write!(f, "Invalid event type: '{s}'"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidInterval { start, end } => {
                write!(f, "Invalid interval: end '{end}' must fall after start '{start}'")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::NoRoomsSelected => write!(f, "A booking must reserve at least one room"),
            Self::InvalidTenant(s) => write!(f, "Invalid tenant: '{s}'"),
        }
    }
}

impl std::error::Error for DomainError {}
