// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking entity.

use crate::status::BookingStatus;
use crate::types::{Room, ServiceCategory, Tenant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The central entity: a request to reserve rooms for an interval.
///
/// A booking is created in `Requested` on submission and mutated exclusively
/// through lifecycle machine transitions; the milestone timestamp/actor pairs
/// below are stamped by the side-effect executor when the corresponding
/// transition commits. The authoritative machine snapshot is persisted next
/// to this record; the `status` field carries the externally visible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Document identity in the store. Zero until first persisted.
    pub booking_id: i64,
    /// External key, stable across the booking's calendar presence. Replaced
    /// only when a modification forces a new calendar event.
    pub calendar_event_id: String,
    /// Sequential, human-facing request number, scoped per tenant.
    pub request_number: i64,
    /// The tenant whose rooms and policies apply.
    pub tenant: Tenant,
    /// The booking's title, as shown on the calendar event.
    pub title: String,
    /// The original requester.
    pub requester_email: String,
    /// Start of the reserved interval.
    pub start_date: DateTime<Utc>,
    /// End of the reserved interval.
    pub end_date: DateTime<Utc>,
    /// When the request was submitted.
    pub requested_at: DateTime<Utc>,
    /// The externally visible status: the last milestone label reached, or
    /// the machine state's label for transitions without one.
    pub status: BookingStatus,
    /// The rooms reserved by this booking.
    pub selected_rooms: Vec<Room>,
    /// Service categories requested on submission.
    pub services_requested: BTreeSet<ServiceCategory>,
    /// Requested categories whose approval tracks have been approved.
    pub services_approved: BTreeSet<ServiceCategory>,
    /// Whether the booking was flagged VIP on submission.
    pub is_vip: bool,
    /// Whether the booking originated as a walk-in.
    pub is_walk_in: bool,
    /// The recorded decline reason, if the booking was declined.
    pub decline_reason: Option<String>,

    pub first_approved_at: Option<DateTime<Utc>>,
    pub first_approved_by: Option<String>,
    pub final_approved_at: Option<DateTime<Utc>>,
    pub final_approved_by: Option<String>,
    pub declined_at: Option<DateTime<Utc>>,
    pub declined_by: Option<String>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub canceled_by: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_in_by: Option<String>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub checked_out_by: Option<String>,
    pub no_showed_at: Option<DateTime<Utc>>,
    pub no_showed_by: Option<String>,
}

impl Booking {
    /// Returns the room ids of the selected rooms, in selection order.
    #[must_use]
    pub fn room_ids(&self) -> Vec<i64> {
        self.selected_rooms.iter().map(|room| room.room_id).collect()
    }

    /// Returns true if a final approval has been recorded on this booking.
    #[must_use]
    pub const fn has_final_approval(&self) -> bool {
        self.final_approved_at.is_some()
    }

    /// Returns true if a liaison pre-approval has been recorded.
    #[must_use]
    pub const fn has_first_approval(&self) -> bool {
        self.first_approved_at.is_some()
    }

    /// Clears every approval timestamp/actor pair and the recorded service
    /// approvals.
    ///
    /// Used when a modification resets the booking to a fresh request. The
    /// fields are explicitly cleared so the persisted record does not carry
    /// stale attribution from the previous approval cycle.
    pub fn clear_approval_fields(&mut self) {
        self.first_approved_at = None;
        self.first_approved_by = None;
        self.final_approved_at = None;
        self.final_approved_by = None;
        self.services_approved.clear();
    }
}
