// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking row mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use room_book::Snapshot;
use room_book_domain::{Booking, Tenant};
use tracing::debug;

use crate::backend;
use crate::data_models::format_timestamp;
use crate::diesel_schema::{bookings, request_counters};
use crate::error::PersistenceError;

/// Inserts a new booking row together with its machine snapshot.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `booking` - The booking to persist; its `booking_id` is ignored
/// * `snapshot` - The machine snapshot to store alongside the row
///
/// # Returns
///
/// The booking ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
    snapshot: &Snapshot,
) -> Result<i64, PersistenceError> {
    let rooms_json: String = serde_json::to_string(&booking.selected_rooms)?;
    let services_requested_json: String = serde_json::to_string(&booking.services_requested)?;
    let services_approved_json: String = serde_json::to_string(&booking.services_approved)?;
    let snapshot_json: String = serde_json::to_string(snapshot)?;

    diesel::insert_into(bookings::table)
        .values((
            bookings::calendar_event_id.eq(&booking.calendar_event_id),
            bookings::request_number.eq(booking.request_number),
            bookings::tenant.eq(booking.tenant.id()),
            bookings::title.eq(&booking.title),
            bookings::requester_email.eq(&booking.requester_email),
            bookings::start_date.eq(format_timestamp(&booking.start_date)),
            bookings::end_date.eq(format_timestamp(&booking.end_date)),
            bookings::requested_at.eq(format_timestamp(&booking.requested_at)),
            bookings::status.eq(booking.status.as_str()),
            bookings::rooms_json.eq(rooms_json),
            bookings::services_requested_json.eq(services_requested_json),
            bookings::services_approved_json.eq(services_approved_json),
            bookings::is_vip.eq(i32::from(booking.is_vip)),
            bookings::is_walk_in.eq(i32::from(booking.is_walk_in)),
            bookings::decline_reason.eq(&booking.decline_reason),
            bookings::snapshot_json.eq(snapshot_json),
        ))
        .execute(conn)?;

    let booking_id: i64 = backend::get_last_insert_rowid(conn)?;
    debug!(
        "Inserted booking {} for calendar event {}",
        booking_id, booking.calendar_event_id
    );
    Ok(booking_id)
}

/// Rewrites a booking row and its machine snapshot in place.
///
/// Milestone columns are written from the booking's fields, including
/// explicit `NULL`s, so a modification reset genuinely deletes stale
/// approval attribution rather than leaving the old values behind.
///
/// # Errors
///
/// Returns an error if the row does not exist or persistence fails.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
    snapshot: &Snapshot,
) -> Result<(), PersistenceError> {
    let rooms_json: String = serde_json::to_string(&booking.selected_rooms)?;
    let services_requested_json: String = serde_json::to_string(&booking.services_requested)?;
    let services_approved_json: String = serde_json::to_string(&booking.services_approved)?;
    let snapshot_json: String = serde_json::to_string(snapshot)?;

    let updated: usize = diesel::update(
        bookings::table.filter(bookings::booking_id.eq(booking.booking_id)),
    )
    .set((
        bookings::calendar_event_id.eq(&booking.calendar_event_id),
        bookings::title.eq(&booking.title),
        bookings::requester_email.eq(&booking.requester_email),
        bookings::start_date.eq(format_timestamp(&booking.start_date)),
        bookings::end_date.eq(format_timestamp(&booking.end_date)),
        bookings::status.eq(booking.status.as_str()),
        bookings::rooms_json.eq(rooms_json),
        bookings::services_requested_json.eq(services_requested_json),
        bookings::services_approved_json.eq(services_approved_json),
        bookings::is_vip.eq(i32::from(booking.is_vip)),
        bookings::is_walk_in.eq(i32::from(booking.is_walk_in)),
        bookings::decline_reason.eq(&booking.decline_reason),
        bookings::snapshot_json.eq(snapshot_json),
        bookings::first_approved_at
            .eq(booking.first_approved_at.as_ref().map(format_timestamp)),
        bookings::first_approved_by.eq(&booking.first_approved_by),
        bookings::final_approved_at
            .eq(booking.final_approved_at.as_ref().map(format_timestamp)),
        bookings::final_approved_by.eq(&booking.final_approved_by),
        bookings::declined_at.eq(booking.declined_at.as_ref().map(format_timestamp)),
        bookings::declined_by.eq(&booking.declined_by),
        bookings::canceled_at.eq(booking.canceled_at.as_ref().map(format_timestamp)),
        bookings::canceled_by.eq(&booking.canceled_by),
        bookings::checked_in_at.eq(booking.checked_in_at.as_ref().map(format_timestamp)),
        bookings::checked_in_by.eq(&booking.checked_in_by),
        bookings::checked_out_at.eq(booking.checked_out_at.as_ref().map(format_timestamp)),
        bookings::checked_out_by.eq(&booking.checked_out_by),
        bookings::no_showed_at.eq(booking.no_showed_at.as_ref().map(format_timestamp)),
        bookings::no_showed_by.eq(&booking.no_showed_by),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::BookingNotFound(booking.booking_id));
    }
    Ok(())
}

/// Allocates the next sequential request number for a tenant.
///
/// Numbers start at 1 and never repeat within a tenant, even across
/// declined or canceled bookings.
///
/// # Errors
///
/// Returns an error if the counter cannot be read or advanced.
pub fn next_request_number(
    conn: &mut SqliteConnection,
    tenant: &Tenant,
) -> Result<i64, PersistenceError> {
    let current: Option<i64> = request_counters::table
        .filter(request_counters::tenant.eq(tenant.id()))
        .select(request_counters::next_number)
        .first::<i64>(conn)
        .optional()?;

    match current {
        Some(number) => {
            diesel::update(
                request_counters::table.filter(request_counters::tenant.eq(tenant.id())),
            )
            .set(request_counters::next_number.eq(number + 1))
            .execute(conn)?;
            Ok(number)
        }
        None => {
            diesel::insert_into(request_counters::table)
                .values((
                    request_counters::tenant.eq(tenant.id()),
                    request_counters::next_number.eq(2_i64),
                ))
                .execute(conn)?;
            Ok(1)
        }
    }
}
