// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use chrono::{DateTime, Utc};
use room_book_domain::{BookingStatus, SYSTEM_ACTOR, ServiceAction, ServiceCategory};
use serde::{Deserialize, Serialize};

/// Represents the entity performing a lifecycle transition.
///
/// An actor is either an identified person (an email address) or the system
/// itself (scheduled jobs, service-caused declines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's identity as recorded in history entries.
    pub email: String,
    /// The type of actor (`"user"` or `"system"`).
    pub actor_type: String,
}

impl Actor {
    /// Creates an actor for an identified person.
    #[must_use]
    pub fn user(email: &str) -> Self {
        Self {
            email: email.to_string(),
            actor_type: String::from("user"),
        }
    }

    /// Creates the system actor used by automated transitions.
    #[must_use]
    pub fn system() -> Self {
        Self {
            email: String::from(SYSTEM_ACTOR),
            actor_type: String::from("system"),
        }
    }

    /// Returns true if this is the system actor.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.actor_type == "system"
    }
}

/// An immutable history log entry recording one lifecycle transition.
///
/// Every meaningful transition must produce exactly one entry (service
/// declines that cause an overall decline produce two: the service entry and
/// a system-attributed decline entry). Entries are never mutated or
/// deleted; the timeline is ordered by timestamp, ties broken by insertion
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLogEntry {
    /// The booking's document identity.
    pub booking_id: i64,
    /// The booking's calendar event id at the time of the transition.
    pub calendar_event_id: String,
    /// The status the transition recorded.
    pub status: BookingStatus,
    /// Who performed the transition.
    pub changed_by: String,
    /// The booking's human-facing request number.
    pub request_number: i64,
    /// Optional human-readable note.
    pub note: Option<String>,
    /// When the transition was recorded.
    pub timestamp: DateTime<Utc>,
}

impl HistoryLogEntry {
    /// Creates a new history log entry.
    ///
    /// Once created, an entry is immutable.
    #[must_use]
    pub const fn new(
        booking_id: i64,
        calendar_event_id: String,
        status: BookingStatus,
        changed_by: String,
        request_number: i64,
        note: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            booking_id,
            calendar_event_id,
            status,
            changed_by,
            request_number,
            note,
            timestamp,
        }
    }
}

/// Composes the human-readable note for a service track decision.
///
/// The form is `"<Service> Service <Approved|Declined|Closed Out>[: <reason>]"`.
#[must_use]
pub fn service_note(
    category: ServiceCategory,
    action: ServiceAction,
    reason: Option<&str>,
) -> String {
    let verb: &str = match action {
        ServiceAction::Approve => "Approved",
        ServiceAction::Decline => "Declined",
        ServiceAction::Closeout => "Closed Out",
    };
    reason.map_or_else(
        || format!("{} Service {verb}", category.label()),
        |reason| format!("{} Service {verb}: {reason}", category.label()),
    )
}

/// Composes the note for the system-attributed overall decline that follows
/// a single service track's decline.
#[must_use]
pub fn service_decline_note(category: ServiceCategory, reason: &str) -> String {
    format!(
        "Booking declined: {} service could not be fulfilled ({reason})",
        category.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_actor_attribution() {
        let actor: Actor = Actor::user("requester@university.edu");

        assert_eq!(actor.email, "requester@university.edu");
        assert!(!actor.is_system());
    }

    #[test]
    fn test_system_actor_attribution() {
        let actor: Actor = Actor::system();

        assert_eq!(actor.email, "System");
        assert!(actor.is_system());
    }

    #[test]
    fn test_history_entry_captures_all_fields() {
        let timestamp = Utc::now();
        let entry: HistoryLogEntry = HistoryLogEntry::new(
            7,
            String::from("cal-evt-1"),
            BookingStatus::Approved,
            String::from("approver@university.edu"),
            42,
            Some(String::from("Final approval")),
            timestamp,
        );

        assert_eq!(entry.booking_id, 7);
        assert_eq!(entry.calendar_event_id, "cal-evt-1");
        assert_eq!(entry.status, BookingStatus::Approved);
        assert_eq!(entry.changed_by, "approver@university.edu");
        assert_eq!(entry.request_number, 42);
        assert_eq!(entry.note.as_deref(), Some("Final approval"));
        assert_eq!(entry.timestamp, timestamp);
    }

    #[test]
    fn test_service_note_without_reason() {
        let note = service_note(ServiceCategory::Staff, ServiceAction::Approve, None);
        assert_eq!(note, "Staff Service Approved");
    }

    #[test]
    fn test_service_note_with_reason() {
        let note = service_note(
            ServiceCategory::Catering,
            ServiceAction::Decline,
            Some("no vendor available"),
        );
        assert_eq!(note, "Catering Service Declined: no vendor available");
    }

    #[test]
    fn test_service_closeout_note() {
        let note = service_note(ServiceCategory::Setup, ServiceAction::Closeout, None);
        assert_eq!(note, "Setup Service Closed Out");
    }

    #[test]
    fn test_overall_decline_note_names_the_service() {
        let note = service_decline_note(ServiceCategory::Security, "staffing shortfall");
        assert_eq!(
            note,
            "Booking declined: Security service could not be fulfilled (staffing shortfall)"
        );
    }
}
