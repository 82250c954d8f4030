// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History log queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use room_book_audit::HistoryLogEntry;

use crate::data_models::HistoryRow;
use crate::diesel_schema::history_log;
use crate::error::PersistenceError;

/// Retrieves the history timeline for a booking, oldest first.
///
/// Ties on timestamp are broken by insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be
/// reconstructed.
pub fn get_history(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Vec<HistoryLogEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = history_log::table
        .filter(history_log::booking_id.eq(booking_id))
        .order((history_log::timestamp.asc(), history_log::history_id.asc()))
        .select(HistoryRow::as_select())
        .load::<HistoryRow>(conn)?;

    rows.into_iter().map(HistoryRow::into_domain).collect()
}
