// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use room_book_domain::{DomainError, ServiceAction, ServiceCategory};
use serde::{Deserialize, Serialize};

/// An event sent to the booking lifecycle machine.
///
/// Events are the only way to request a transition. Service events are
/// explicit variants carrying a typed [`ServiceCategory`] and are built via
/// [`BookingEvent::for_service`]; event identity is never assembled from
/// strings at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingEvent {
    /// Liaison or final approver advances the booking.
    Approve {
        /// The approver performing the action.
        email: String,
    },
    /// An approver declines the booking outright.
    Decline {
        /// The approver performing the action.
        email: String,
        /// The stated reason, if any.
        reason: Option<String>,
    },
    /// The requester or an admin cancels the booking.
    Cancel {
        /// The actor performing the action.
        email: String,
    },
    /// The requester checks in at the start of the reservation.
    CheckIn {
        /// The actor performing the action.
        email: String,
    },
    /// The requester (or the scheduler) checks out.
    CheckOut {
        /// The actor performing the action.
        email: String,
    },
    /// Staff marks the booking a no-show.
    NoShow {
        /// The actor performing the action.
        email: String,
    },
    /// Administrative forced close, triggered by a scheduled job.
    AutoClose,
    /// A service approver approves one service track.
    ServiceApprove {
        /// The service category being approved.
        category: ServiceCategory,
        /// The service approver performing the action.
        email: String,
    },
    /// A service approver declines one service track.
    ServiceDecline {
        /// The service category being declined.
        category: ServiceCategory,
        /// The service approver performing the action.
        email: String,
        /// The stated reason, if any.
        reason: Option<String>,
    },
    /// A service approver closes out one service track after the booking
    /// ended.
    ServiceCloseout {
        /// The service category being closed out.
        category: ServiceCategory,
        /// The service approver performing the action.
        email: String,
    },
}

impl BookingEvent {
    /// Builds the service event for a category and action.
    ///
    /// This is the typed lookup from (category, action) to event variant;
    /// there is deliberately no string-based event construction.
    #[must_use]
    pub fn for_service(
        category: ServiceCategory,
        action: ServiceAction,
        email: &str,
        reason: Option<String>,
    ) -> Self {
        match action {
            ServiceAction::Approve => Self::ServiceApprove {
                category,
                email: email.to_string(),
            },
            ServiceAction::Decline => Self::ServiceDecline {
                category,
                email: email.to_string(),
                reason,
            },
            ServiceAction::Closeout => Self::ServiceCloseout {
                category,
                email: email.to_string(),
            },
        }
    }

    /// Parses an interactive transition event from its wire name.
    ///
    /// Service events use the dedicated service-action payload and are not
    /// reachable through this parser; `autoCloseScript` is reserved for the
    /// scheduled-job adapter.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEventType` for an unrecognized name.
    pub fn parse_transition(
        event_type: &str,
        email: &str,
        reason: Option<String>,
    ) -> Result<Self, DomainError> {
        match event_type {
            "approve" => Ok(Self::Approve {
                email: email.to_string(),
            }),
            "decline" => Ok(Self::Decline {
                email: email.to_string(),
                reason,
            }),
            "cancel" => Ok(Self::Cancel {
                email: email.to_string(),
            }),
            "checkIn" => Ok(Self::CheckIn {
                email: email.to_string(),
            }),
            "checkOut" => Ok(Self::CheckOut {
                email: email.to_string(),
            }),
            "noShow" => Ok(Self::NoShow {
                email: email.to_string(),
            }),
            _ => Err(DomainError::InvalidEventType(event_type.to_string())),
        }
    }

    /// Returns the actor email carried by the event, if any.
    #[must_use]
    pub fn actor_email(&self) -> Option<&str> {
        match self {
            Self::Approve { email }
            | Self::Decline { email, .. }
            | Self::Cancel { email }
            | Self::CheckIn { email }
            | Self::CheckOut { email }
            | Self::NoShow { email }
            | Self::ServiceApprove { email, .. }
            | Self::ServiceDecline { email, .. }
            | Self::ServiceCloseout { email, .. } => Some(email),
            Self::AutoClose => None,
        }
    }
}

impl std::fmt::Display for BookingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve { .. } => write!(f, "approve"),
            Self::Decline { .. } => write!(f, "decline"),
            Self::Cancel { .. } => write!(f, "cancel"),
            Self::CheckIn { .. } => write!(f, "checkIn"),
            Self::CheckOut { .. } => write!(f, "checkOut"),
            Self::NoShow { .. } => write!(f, "noShow"),
            Self::AutoClose => write!(f, "autoCloseScript"),
            Self::ServiceApprove { category, .. } => {
                write!(f, "approve{}", category.label())
            }
            Self::ServiceDecline { category, .. } => {
                write!(f, "decline{}", category.label())
            }
            Self::ServiceCloseout { category, .. } => {
                write!(f, "closeout{}", category.label())
            }
        }
    }
}
