// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use room_book_domain::{
    BookingStatus, CloseoutProgress, Room, ServiceTracks, Tenant,
};
use serde::{Deserialize, Serialize};

/// The lifecycle machine's state value.
///
/// Checked-out is not a resting state: the `checkOut` event stamps its
/// milestone and the snapshot immediately rests in `ServiceCloseout` or
/// `Closed` within the same transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateValue {
    /// Awaiting liaison pre-approval.
    Requested,
    /// Pre-approved, awaiting final approval.
    PreApproved,
    /// Per-service approval tracks open; rendezvous pending.
    ServicesRequest,
    /// Fully approved.
    Approved,
    /// Checked in, reservation in progress.
    CheckedIn,
    /// Approved services being wound down after checkout or cancellation.
    ServiceCloseout,
    /// Declined. Terminal.
    Declined,
    /// Closed. Terminal.
    Closed,
}

impl StateValue {
    /// Returns the status label mirroring this state value.
    ///
    /// Milestone labels (`CANCELED`, `CHECKED_OUT`, `NO_SHOW`) are carried
    /// on the transition itself, not derived from the resting value.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        match self {
            Self::Requested => BookingStatus::Requested,
            Self::PreApproved => BookingStatus::PreApproved,
            Self::ServicesRequest => BookingStatus::ServicesRequest,
            Self::Approved => BookingStatus::Approved,
            Self::CheckedIn => BookingStatus::CheckedIn,
            Self::ServiceCloseout => BookingStatus::ServiceCloseout,
            Self::Declined => BookingStatus::Declined,
            Self::Closed => BookingStatus::Closed,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Declined | Self::Closed)
    }
}

/// The booking context carried inside the machine snapshot.
///
/// Guards read these fields; actions update the service tracks, closeout
/// progress, and decline reason. Everything else is fixed at construction
/// (or replaced wholesale by the modification reconciler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// The tenant whose policies apply.
    pub tenant: Tenant,
    /// The booking's calendar event id; all side effects reference it.
    pub calendar_event_id: String,
    /// The original requester, used as the default notification target.
    pub email: String,
    /// The rooms reserved by the booking.
    pub selected_rooms: Vec<Room>,
    /// Start of the reserved interval.
    pub start_date: DateTime<Utc>,
    /// End of the reserved interval.
    pub end_date: DateTime<Utc>,
    /// VIP bookings bypass manual pre-approval.
    pub is_vip: bool,
    /// Walk-in bookings bypass manual pre-approval.
    pub is_walk_in: bool,
    /// Tenant-level policy forcing manual approval even for auto-approve
    /// rooms. Kept separate from the room flag so the two guards stay
    /// independently testable.
    pub tenant_requires_manual_approval: bool,
    /// The per-service approval tracks.
    pub services: ServiceTracks,
    /// Closeout obligations once the booking has ended.
    pub closeout: CloseoutProgress,
    /// The recorded decline reason, if any.
    pub decline_reason: Option<String>,
}

impl Context {
    /// Returns true if every selected room auto-approves.
    #[must_use]
    pub fn all_rooms_auto_approve(&self) -> bool {
        !self.selected_rooms.is_empty()
            && self.selected_rooms.iter().all(|room| room.should_auto_approve)
    }
}

/// The serialized machine snapshot: the single source of truth for what
/// state a booking is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The current state value.
    pub value: StateValue,
    /// The booking context.
    pub context: Context,
}

impl Snapshot {
    /// Builds the initial snapshot for a new submission, applying the
    /// initial-routing guards.
    ///
    /// - VIP and walk-in bookings bypass `Requested`/`PreApproved`: with any
    ///   requested service they start in `ServicesRequest`, otherwise in
    ///   `Approved`.
    /// - Otherwise, the booking starts in `Approved` only when every
    ///   selected room auto-approves, no service is requested, and the
    ///   tenant does not force manual approval; in all other cases it starts
    ///   in `Requested`.
    #[must_use]
    pub fn new(context: Context) -> Self {
        let value: StateValue = if context.is_vip || context.is_walk_in {
            if context.services.is_empty() {
                StateValue::Approved
            } else {
                StateValue::ServicesRequest
            }
        } else if context.all_rooms_auto_approve()
            && context.services.is_empty()
            && !context.tenant_requires_manual_approval
        {
            StateValue::Approved
        } else {
            StateValue::Requested
        };
        Self { value, context }
    }

    /// Builds a snapshot resting in `Requested`, bypassing initial routing.
    ///
    /// Used by the modification reconciler when resetting a booking that was
    /// never approved.
    #[must_use]
    pub const fn requested(context: Context) -> Self {
        Self {
            value: StateValue::Requested,
            context,
        }
    }

    /// Returns true if the snapshot rests in the given state value.
    #[must_use]
    pub fn matches(&self, value: StateValue) -> bool {
        self.value == value
    }
}
