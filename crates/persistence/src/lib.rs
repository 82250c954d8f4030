// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Room Booking System.
//!
//! This crate stores booking records, their authoritative machine
//! snapshots, the append-only history log, and the per-tenant request
//! number counters. It is built on Diesel over `SQLite`.
//!
//! ## Storage Model
//!
//! Each booking row carries a mirror of the externally visible fields
//! (status label, milestone timestamp/actor pairs, service sets) plus the
//! serialized machine snapshot. Entry adapters load the snapshot to drive
//! transitions and write the mirror columns back when a transition commits,
//! so readers never have to interpret the snapshot themselves.
//!
//! ## Testing
//!
//! Tests run against unique in-memory `SQLite` databases. Each call to
//! [`Persistence::new_in_memory`] receives its own database via an atomic
//! counter, so tests stay isolated without time-based naming.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use room_book::Snapshot;
use room_book_audit::HistoryLogEntry;
use room_book_domain::{Booking, Tenant};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so test
/// databases never collide.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for bookings, snapshots, and the history log.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Allocates the next sequential request number for a tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read or advanced.
    pub fn next_request_number(&mut self, tenant: &Tenant) -> Result<i64, PersistenceError> {
        mutations::next_request_number(&mut self.conn, tenant)
    }

    /// Persists a new booking together with its machine snapshot.
    ///
    /// # Returns
    ///
    /// The booking ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_booking(
        &mut self,
        booking: &Booking,
        snapshot: &Snapshot,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_booking(&mut self.conn, booking, snapshot)
    }

    /// Rewrites a booking and its machine snapshot in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist or persistence fails.
    pub fn update_booking(
        &mut self,
        booking: &Booking,
        snapshot: &Snapshot,
    ) -> Result<(), PersistenceError> {
        mutations::update_booking(&mut self.conn, booking, snapshot)
    }

    /// Retrieves a booking and its machine snapshot by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is not found.
    pub fn get_booking(
        &mut self,
        booking_id: i64,
    ) -> Result<(Booking, Snapshot), PersistenceError> {
        queries::get_booking(&mut self.conn, booking_id)
    }

    /// Retrieves a booking and its machine snapshot by calendar event ID.
    ///
    /// # Errors
    ///
    /// Returns an error if no booking carries the calendar event ID.
    pub fn get_booking_by_calendar_event(
        &mut self,
        calendar_event_id: &str,
    ) -> Result<(Booking, Snapshot), PersistenceError> {
        queries::get_booking_by_calendar_event(&mut self.conn, calendar_event_id)
    }

    /// Retrieves every booking still resting in `APPROVED` or `CHECKED_IN`
    /// whose reserved interval ended before the cutoff.
    ///
    /// Used by the auto-checkout job.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_open_past_end(
        &mut self,
        cutoff: &DateTime<Utc>,
    ) -> Result<Vec<(Booking, Snapshot)>, PersistenceError> {
        queries::list_open_past_end(&mut self.conn, cutoff)
    }

    /// Appends one history log entry.
    ///
    /// # Returns
    ///
    /// The history ID assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the referenced booking does not exist.
    pub fn append_history(&mut self, entry: &HistoryLogEntry) -> Result<i64, PersistenceError> {
        mutations::append_history(&mut self.conn, entry)
    }

    /// Retrieves the history timeline for a booking, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_history(
        &mut self,
        booking_id: i64,
    ) -> Result<Vec<HistoryLogEntry>, PersistenceError> {
        queries::get_history(&mut self.conn, booking_id)
    }
}
