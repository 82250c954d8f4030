// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.

pub mod bookings;
pub mod history;

pub use bookings::{get_booking, get_booking_by_calendar_event, list_open_past_end};
pub use history::get_history;
