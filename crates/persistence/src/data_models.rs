// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and row-to-domain conversions.
//!
//! Timestamps are stored as RFC 3339 text, booleans as integers, and the
//! room list plus service sets as JSON text columns. The machine snapshot
//! travels next to the booking row as `snapshot_json` so rehydration does
//! not have to re-derive track states from the mirror columns.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use room_book::Snapshot;
use room_book_audit::HistoryLogEntry;
use room_book_domain::{Booking, BookingStatus, Room, ServiceCategory, Tenant};
use std::collections::BTreeSet;

use crate::diesel_schema::{bookings, history_log};
use crate::error::PersistenceError;

/// Formats a timestamp for storage.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the stored text is not valid RFC 3339.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| PersistenceError::ReconstructionError(format!("Bad timestamp {raw:?}: {e}")))
}

fn parse_optional_timestamp(
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, PersistenceError> {
    raw.map(parse_timestamp).transpose()
}

/// Diesel Queryable struct for full booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub struct BookingRow {
    pub booking_id: i64,
    pub calendar_event_id: String,
    pub request_number: i64,
    pub tenant: String,
    pub title: String,
    pub requester_email: String,
    pub start_date: String,
    pub end_date: String,
    pub requested_at: String,
    pub status: String,
    pub rooms_json: String,
    pub services_requested_json: String,
    pub services_approved_json: String,
    pub is_vip: i32,
    pub is_walk_in: i32,
    pub decline_reason: Option<String>,
    pub snapshot_json: String,
    pub first_approved_at: Option<String>,
    pub first_approved_by: Option<String>,
    pub final_approved_at: Option<String>,
    pub final_approved_by: Option<String>,
    pub declined_at: Option<String>,
    pub declined_by: Option<String>,
    pub canceled_at: Option<String>,
    pub canceled_by: Option<String>,
    pub checked_in_at: Option<String>,
    pub checked_in_by: Option<String>,
    pub checked_out_at: Option<String>,
    pub checked_out_by: Option<String>,
    pub no_showed_at: Option<String>,
    pub no_showed_by: Option<String>,
}

impl BookingRow {
    /// Converts the row into the booking entity and its machine snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored column cannot be turned back into its
    /// domain value.
    pub fn into_domain(self) -> Result<(Booking, Snapshot), PersistenceError> {
        let status: BookingStatus = self
            .status
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
        let selected_rooms: Vec<Room> = serde_json::from_str(&self.rooms_json)?;
        let services_requested: BTreeSet<ServiceCategory> =
            serde_json::from_str(&self.services_requested_json)?;
        let services_approved: BTreeSet<ServiceCategory> =
            serde_json::from_str(&self.services_approved_json)?;
        let snapshot: Snapshot = serde_json::from_str(&self.snapshot_json)?;

        let booking: Booking = Booking {
            booking_id: self.booking_id,
            calendar_event_id: self.calendar_event_id,
            request_number: self.request_number,
            tenant: Tenant::new(&self.tenant),
            title: self.title,
            requester_email: self.requester_email,
            start_date: parse_timestamp(&self.start_date)?,
            end_date: parse_timestamp(&self.end_date)?,
            requested_at: parse_timestamp(&self.requested_at)?,
            status,
            selected_rooms,
            services_requested,
            services_approved,
            is_vip: self.is_vip != 0,
            is_walk_in: self.is_walk_in != 0,
            decline_reason: self.decline_reason,
            first_approved_at: parse_optional_timestamp(self.first_approved_at.as_deref())?,
            first_approved_by: self.first_approved_by,
            final_approved_at: parse_optional_timestamp(self.final_approved_at.as_deref())?,
            final_approved_by: self.final_approved_by,
            declined_at: parse_optional_timestamp(self.declined_at.as_deref())?,
            declined_by: self.declined_by,
            canceled_at: parse_optional_timestamp(self.canceled_at.as_deref())?,
            canceled_by: self.canceled_by,
            checked_in_at: parse_optional_timestamp(self.checked_in_at.as_deref())?,
            checked_in_by: self.checked_in_by,
            checked_out_at: parse_optional_timestamp(self.checked_out_at.as_deref())?,
            checked_out_by: self.checked_out_by,
            no_showed_at: parse_optional_timestamp(self.no_showed_at.as_deref())?,
            no_showed_by: self.no_showed_by,
        };

        Ok((booking, snapshot))
    }
}

/// Diesel Queryable struct for history log rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = history_log)]
pub struct HistoryRow {
    #[allow(dead_code)]
    pub history_id: i64,
    pub booking_id: i64,
    pub calendar_event_id: String,
    pub status: String,
    pub changed_by: String,
    pub request_number: i64,
    pub note: Option<String>,
    pub timestamp: String,
}

impl HistoryRow {
    /// Converts the row into a history log entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the status label or timestamp cannot be parsed.
    pub fn into_domain(self) -> Result<HistoryLogEntry, PersistenceError> {
        let status: BookingStatus = self
            .status
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("{e}")))?;
        Ok(HistoryLogEntry::new(
            self.booking_id,
            self.calendar_event_id,
            status,
            self.changed_by,
            self.request_number,
            self.note,
            parse_timestamp(&self.timestamp)?,
        ))
    }
}
