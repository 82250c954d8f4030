// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status labels.
//!
//! Every externally visible surface (persisted status column, history log
//! entries, calendar title prefixes, notification emails) uses these labels.
//! The status label is derived from the lifecycle machine's state value and
//! never diverges from it outside an in-flight transition.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The externally visible status of a booking.
///
/// `Canceled`, `CheckedOut`, and `NoShow` are milestone labels: the machine
/// itself rests in a closeout or closed state after those transitions, but
/// the history log and calendar record the milestone that was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Submitted, awaiting liaison pre-approval.
    Requested,
    /// Liaison pre-approval granted, awaiting final approval.
    PreApproved,
    /// Final approval granted, per-service approval tracks open.
    ServicesRequest,
    /// Fully approved; the reservation stands.
    Approved,
    /// Declined by an approver or by a service track.
    Declined,
    /// Canceled by the requester or an admin.
    Canceled,
    /// The requester checked in.
    CheckedIn,
    /// The requester (or the scheduler) checked out.
    CheckedOut,
    /// The requester never showed up.
    NoShow,
    /// Approved services are being wound down after the booking ended.
    ServiceCloseout,
    /// Logically retired. Never deleted.
    Closed,
}

impl BookingStatus {
    /// Returns the persisted string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::PreApproved => "PRE_APPROVED",
            Self::ServicesRequest => "SERVICES_REQUEST",
            Self::Approved => "APPROVED",
            Self::Declined => "DECLINED",
            Self::Canceled => "CANCELED",
            Self::CheckedIn => "CHECKED_IN",
            Self::CheckedOut => "CHECKED_OUT",
            Self::NoShow => "NO_SHOW",
            Self::ServiceCloseout => "SERVICE_CLOSEOUT",
            Self::Closed => "CLOSED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "REQUESTED" => Ok(Self::Requested),
            "PRE_APPROVED" => Ok(Self::PreApproved),
            "SERVICES_REQUEST" => Ok(Self::ServicesRequest),
            "APPROVED" => Ok(Self::Approved),
            "DECLINED" => Ok(Self::Declined),
            "CANCELED" => Ok(Self::Canceled),
            "CHECKED_IN" => Ok(Self::CheckedIn),
            "CHECKED_OUT" => Ok(Self::CheckedOut),
            "NO_SHOW" => Ok(Self::NoShow),
            "SERVICE_CLOSEOUT" => Ok(Self::ServiceCloseout),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// Returns true if no further lifecycle transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Declined | Self::Closed)
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
