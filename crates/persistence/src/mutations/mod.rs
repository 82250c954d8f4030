// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! All mutations use Diesel DSL, with the single `last_insert_rowid()`
//! helper imported from the `backend` module.

pub mod bookings;
pub mod history;

pub use bookings::{insert_booking, next_request_number, update_booking};
pub use history::append_history;
