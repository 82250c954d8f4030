// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking row queries.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use room_book::Snapshot;
use room_book_domain::{Booking, BookingStatus};

use crate::data_models::{BookingRow, format_timestamp};
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

/// Retrieves a booking and its machine snapshot by ID.
///
/// # Errors
///
/// Returns an error if the booking is not found or a stored column cannot
/// be reconstructed.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<(Booking, Snapshot), PersistenceError> {
    let result = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first::<BookingRow>(conn);

    match result {
        Ok(row) => row.into_domain(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::BookingNotFound(booking_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a booking and its machine snapshot by calendar event ID.
///
/// # Errors
///
/// Returns an error if no booking carries the calendar event ID or a stored
/// column cannot be reconstructed.
pub fn get_booking_by_calendar_event(
    conn: &mut SqliteConnection,
    calendar_event_id: &str,
) -> Result<(Booking, Snapshot), PersistenceError> {
    let result = bookings::table
        .filter(bookings::calendar_event_id.eq(calendar_event_id))
        .select(BookingRow::as_select())
        .first::<BookingRow>(conn);

    match result {
        Ok(row) => row.into_domain(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::CalendarEventNotFound(
            calendar_event_id.to_string(),
        )),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves every booking still resting in `APPROVED` or `CHECKED_IN`
/// whose reserved interval ended before the cutoff.
///
/// Timestamps are stored as RFC 3339 UTC text, so lexicographic comparison
/// matches chronological order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored column cannot be
/// reconstructed.
pub fn list_open_past_end(
    conn: &mut SqliteConnection,
    cutoff: &DateTime<Utc>,
) -> Result<Vec<(Booking, Snapshot)>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(
            bookings::status
                .eq(BookingStatus::Approved.as_str())
                .or(bookings::status.eq(BookingStatus::CheckedIn.as_str())),
        )
        .filter(bookings::end_date.lt(format_timestamp(cutoff)))
        .order(bookings::booking_id.asc())
        .select(BookingRow::as_select())
        .load::<BookingRow>(conn)?;

    rows.into_iter().map(BookingRow::into_domain).collect()
}
