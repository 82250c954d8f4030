// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History log mutations.
//!
//! History rows are append-only. There is no update or delete path.

use diesel::prelude::*;
use diesel::SqliteConnection;
use room_book_audit::HistoryLogEntry;
use tracing::debug;

use crate::backend;
use crate::data_models::format_timestamp;
use crate::diesel_schema::history_log;
use crate::error::PersistenceError;

/// Appends one history log entry.
///
/// # Returns
///
/// The history ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the referenced booking does not exist or the insert
/// fails.
pub fn append_history(
    conn: &mut SqliteConnection,
    entry: &HistoryLogEntry,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(history_log::table)
        .values((
            history_log::booking_id.eq(entry.booking_id),
            history_log::calendar_event_id.eq(&entry.calendar_event_id),
            history_log::status.eq(entry.status.as_str()),
            history_log::changed_by.eq(&entry.changed_by),
            history_log::request_number.eq(entry.request_number),
            history_log::note.eq(&entry.note),
            history_log::timestamp.eq(format_timestamp(&entry.timestamp)),
        ))
        .execute(conn)?;

    let history_id: i64 = backend::get_last_insert_rowid(conn)?;
    debug!(
        "Appended history entry {} for booking {}",
        history_id, entry.booking_id
    );
    Ok(history_id)
}
