// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The side-effect executor.
//!
//! Every committed transition runs the same sequence: persist the updated
//! booking record and snapshot, mirror the new status onto the calendar
//! event, notify the requester, and append the transition's history notes.
//! The record write is fatal; calendar and email failures are logged and
//! swallowed so an unreachable outbound service never blocks the lifecycle.
//! The store lock is taken only around the writes, never across the
//! outbound awaits, so a slow calendar or mailer stalls one booking at
//! most (the caller's per-booking lock) and never the whole store.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use room_book::{Attribution, Milestone, Transition};
use room_book_audit::HistoryLogEntry;
use room_book_connectors::{BookingEmail, CalendarEventFields, CalendarService, EmailService, format_event_title};
use room_book_domain::{Booking, BookingStatus};
use room_book_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Runs a transition's side effects in their committed order.
pub struct SideEffectExecutor {
    calendar: Arc<dyn CalendarService>,
    email: Arc<dyn EmailService>,
}

impl SideEffectExecutor {
    /// Creates an executor over the given outbound services.
    #[must_use]
    pub fn new(calendar: Arc<dyn CalendarService>, email: Arc<dyn EmailService>) -> Self {
        Self { calendar, email }
    }

    /// Executes a committed transition against one booking.
    ///
    /// The booking record is updated in place: status, recorded service
    /// approvals, decline reason, and the milestone timestamp/actor pair.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the record write or a history append
    /// fails. Calendar and email failures are logged, never returned.
    pub async fn run(
        &self,
        persistence: &Mutex<Persistence>,
        booking: &mut Booking,
        transition: &Transition,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let snapshot = &transition.snapshot;
        booking.status = transition
            .milestone
            .as_ref()
            .map_or_else(|| snapshot.value.status(), |milestone| milestone.status);
        booking.services_approved = snapshot.context.services.approved();
        booking.decline_reason = snapshot.context.decline_reason.clone();
        if let Some(milestone) = &transition.milestone {
            stamp_milestone(booking, milestone, now);
        }
        persistence
            .lock()
            .await
            .update_booking(booking, snapshot)?;

        if let Some(milestone) = &transition.milestone {
            self.patch_calendar(booking, milestone.status).await;
            self.notify_requester(booking, milestone.status).await;
        }

        let mut store = persistence.lock().await;
        for note in &transition.history {
            let entry = HistoryLogEntry::new(
                booking.booking_id,
                booking.calendar_event_id.clone(),
                note.status,
                note.changed_by.clone(),
                booking.request_number,
                note.note.clone(),
                now,
            );
            store.append_history(&entry)?;
        }
        Ok(())
    }

    /// Mirrors the booking's new status onto its calendar event.
    async fn patch_calendar(&self, booking: &Booking, status: BookingStatus) {
        let Some(calendar_id) = primary_calendar_id(booking) else {
            return;
        };
        let fields = CalendarEventFields {
            title: format_event_title(status, &booking.room_ids(), &booking.title),
            description: event_description(booking),
        };
        if let Err(err) = self
            .calendar
            .patch_event(calendar_id, &booking.calendar_event_id, &fields)
            .await
        {
            tracing::error!(
                booking_id = booking.booking_id,
                tenant = booking.tenant.id(),
                calendar_event_id = %booking.calendar_event_id,
                error = %err,
                "calendar patch failed"
            );
        }
    }

    /// Emails the requester about the transition.
    async fn notify_requester(&self, booking: &Booking, status: BookingStatus) {
        let email = BookingEmail {
            calendar_event_id: booking.calendar_event_id.clone(),
            target_email: booking.requester_email.clone(),
            header_message: header_message(status).to_string(),
            status,
            tenant: booking.tenant.clone(),
        };
        if let Err(err) = self.email.send_booking_email(&email).await {
            tracing::error!(
                booking_id = booking.booking_id,
                tenant = booking.tenant.id(),
                error = %err,
                "booking notification email failed"
            );
        }
    }
}

/// Returns the calendar carrying the booking's event, if any rooms remain.
#[must_use]
pub fn primary_calendar_id(booking: &Booking) -> Option<&str> {
    booking
        .selected_rooms
        .first()
        .map(|room| room.calendar_id.as_str())
}

/// Builds the calendar event description for a booking.
#[must_use]
pub fn event_description(booking: &Booking) -> String {
    format!(
        "Request #{} for {}",
        booking.request_number, booking.requester_email
    )
}

/// Stamps the milestone's timestamp/actor pair onto the booking record.
fn stamp_milestone(booking: &mut Booking, milestone: &Milestone, now: DateTime<Utc>) {
    let actor = milestone.actor.email.clone();
    match milestone.attribution {
        Some(Attribution::FirstApproved) => {
            booking.first_approved_at = Some(now);
            booking.first_approved_by = Some(actor);
        }
        Some(Attribution::FinalApproved) => {
            booking.final_approved_at = Some(now);
            booking.final_approved_by = Some(actor);
        }
        Some(Attribution::Declined) => {
            booking.declined_at = Some(now);
            booking.declined_by = Some(actor);
        }
        Some(Attribution::Canceled) => {
            booking.canceled_at = Some(now);
            booking.canceled_by = Some(actor);
        }
        Some(Attribution::CheckedIn) => {
            booking.checked_in_at = Some(now);
            booking.checked_in_by = Some(actor);
        }
        Some(Attribution::CheckedOut) => {
            booking.checked_out_at = Some(now);
            booking.checked_out_by = Some(actor);
        }
        Some(Attribution::NoShowed) => {
            booking.no_showed_at = Some(now);
            booking.no_showed_by = Some(actor);
        }
        None => {}
    }
}

/// Returns the notification header line for a status.
#[must_use]
pub const fn header_message(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Requested => "Your booking request has been received.",
        BookingStatus::PreApproved => "Your booking request has been pre-approved.",
        BookingStatus::ServicesRequest => {
            "Your booking is awaiting service approvals."
        }
        BookingStatus::Approved => "Your booking has been approved.",
        BookingStatus::Declined => "Your booking request has been declined.",
        BookingStatus::Canceled => "Your booking has been canceled.",
        BookingStatus::CheckedIn => "You are checked in.",
        BookingStatus::CheckedOut => "You have been checked out.",
        BookingStatus::NoShow => "Your booking was recorded as a no-show.",
        BookingStatus::ServiceCloseout => {
            "Your booking has ended and services are being closed out."
        }
        BookingStatus::Closed => "Your booking has been closed.",
    }
}
