// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use chrono::{DateTime, Utc};
use room_book_audit::HistoryLogEntry;
use room_book_domain::{Booking, Room, ServiceCategory};
use std::collections::BTreeSet;

/// API request to submit a new booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitBookingRequest {
    /// The tenant whose rooms are being reserved.
    pub tenant: String,
    /// The booking title.
    pub title: String,
    /// The requester's email address.
    pub requester_email: String,
    /// Start of the reserved interval.
    pub start_date: DateTime<Utc>,
    /// End of the reserved interval.
    pub end_date: DateTime<Utc>,
    /// The rooms to reserve. Must be non-empty.
    pub selected_rooms: Vec<Room>,
    /// Service categories requested alongside the rooms.
    #[serde(default)]
    pub services_requested: BTreeSet<ServiceCategory>,
    /// Whether the booking is flagged VIP.
    #[serde(default)]
    pub is_vip: bool,
    /// Whether the booking originated as a walk-in.
    #[serde(default)]
    pub is_walk_in: bool,
    /// Tenant policy override forcing manual approval for every booking.
    #[serde(default)]
    pub tenant_requires_manual_approval: bool,
}

/// API response for a successful booking submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitBookingResponse {
    /// The canonical document identifier.
    pub booking_id: i64,
    /// The calendar event id the booking is addressed by.
    pub calendar_event_id: String,
    /// The per-tenant sequential request number.
    pub request_number: i64,
    /// The booking's status after submission routing.
    pub status: String,
}

/// API request to send one lifecycle event to a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionRequest {
    /// The booking's calendar event id.
    pub calendar_event_id: String,
    /// The event name: approve, decline, cancel, checkIn, checkOut, noShow.
    pub event_type: String,
    /// The acting user's email.
    pub email: String,
    /// Optional reason, recorded on declines.
    #[serde(default)]
    pub reason: Option<String>,
}

/// API response for a transition request.
///
/// `changed: false` reports that the event had no transition defined for the
/// booking's current state and nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionResponse {
    /// The booking's calendar event id.
    pub calendar_event_id: String,
    /// The booking's status after the event.
    pub status: String,
    /// Whether the event changed anything.
    pub changed: bool,
}

/// API request to act on one parallel service approval track.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ServiceActionRequest {
    /// The booking's calendar event id.
    pub calendar_event_id: String,
    /// The service category, e.g. "staff" or "catering".
    pub service_type: String,
    /// The action: approve, decline, or closeout.
    pub action: String,
    /// The acting service approver's email.
    pub email: String,
    /// Optional reason, recorded on service declines.
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request to modify an existing booking's reservation details.
///
/// A modification replaces the calendar event, so the booking is addressed
/// by its current calendar event id and answers with the new one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModifyBookingRequest {
    /// The booking's current calendar event id.
    pub calendar_event_id: String,
    /// The new booking title.
    pub title: String,
    /// New start of the reserved interval.
    pub start_date: DateTime<Utc>,
    /// New end of the reserved interval.
    pub end_date: DateTime<Utc>,
    /// The new room selection. Must be non-empty.
    pub selected_rooms: Vec<Room>,
    /// The new set of requested service categories.
    #[serde(default)]
    pub services_requested: BTreeSet<ServiceCategory>,
    /// The user performing the edit.
    pub modified_by: String,
}

/// API response for a modification request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModifyBookingResponse {
    /// The replacement calendar event id.
    pub calendar_event_id: String,
    /// The booking's status after reconciliation.
    pub status: String,
    /// Whether the prior approval survived the edit.
    pub preserved: bool,
}

/// Summary of one scheduled auto-checkout run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AutoCheckoutSummary {
    /// Bookings whose end date qualified them for the run.
    pub candidates: usize,
    /// Checked-in bookings the run checked out.
    pub checked_out: usize,
    /// Still-approved bookings the run force-closed.
    pub closed: usize,
    /// Candidates whose event turned out to be a no-op.
    pub skipped: usize,
    /// Candidates whose side effects failed.
    pub failed: usize,
    /// One message per failed candidate.
    pub failures: Vec<String>,
    /// Whether the run only reported, without mutating.
    pub dry_run: bool,
}

/// Read-model view of a booking record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookingView {
    pub booking_id: i64,
    pub calendar_event_id: String,
    pub request_number: i64,
    pub tenant: String,
    pub title: String,
    pub requester_email: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub requested_at: DateTime<Utc>,
    pub status: String,
    pub selected_rooms: Vec<Room>,
    pub services_requested: BTreeSet<ServiceCategory>,
    pub services_approved: BTreeSet<ServiceCategory>,
    pub is_vip: bool,
    pub is_walk_in: bool,
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

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            booking_id: booking.booking_id,
            calendar_event_id: booking.calendar_event_id.clone(),
            request_number: booking.request_number,
            tenant: booking.tenant.id().to_string(),
            title: booking.title.clone(),
            requester_email: booking.requester_email.clone(),
            start_date: booking.start_date,
            end_date: booking.end_date,
            requested_at: booking.requested_at,
            status: booking.status.to_string(),
            selected_rooms: booking.selected_rooms.clone(),
            services_requested: booking.services_requested.clone(),
            services_approved: booking.services_approved.clone(),
            is_vip: booking.is_vip,
            is_walk_in: booking.is_walk_in,
            decline_reason: booking.decline_reason.clone(),
            first_approved_at: booking.first_approved_at,
            first_approved_by: booking.first_approved_by.clone(),
            final_approved_at: booking.final_approved_at,
            final_approved_by: booking.final_approved_by.clone(),
            declined_at: booking.declined_at,
            declined_by: booking.declined_by.clone(),
            canceled_at: booking.canceled_at,
            canceled_by: booking.canceled_by.clone(),
            checked_in_at: booking.checked_in_at,
            checked_in_by: booking.checked_in_by.clone(),
            checked_out_at: booking.checked_out_at,
            checked_out_by: booking.checked_out_by.clone(),
            no_showed_at: booking.no_showed_at,
            no_showed_by: booking.no_showed_by.clone(),
        }
    }
}

/// Read-model view of one history timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntryView {
    pub status: String,
    pub changed_by: String,
    pub request_number: i64,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<&HistoryLogEntry> for HistoryEntryView {
    fn from(entry: &HistoryLogEntry) -> Self {
        Self {
            status: entry.status.to_string(),
            changed_by: entry.changed_by.clone(),
            request_number: entry.request_number,
            note: entry.note.clone(),
            timestamp: entry.timestamp,
        }
    }
}
