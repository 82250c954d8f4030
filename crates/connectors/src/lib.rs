// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound collaborators for the Room Booking System.
//!
//! The booking lifecycle machine is pure; everything that leaves the
//! process goes through the traits here. The calendar is a downstream
//! mirror of booking state (best-effort after the first event creation),
//! and email is fire-and-forget.
//!
//! Production implementations are a generic REST calendar client and an
//! SMTP mailer; a console mailer covers development, and recording/failing
//! doubles live in [`mocks`] for tests.

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

mod calendar;
mod email;
mod error;
pub mod mocks;

pub use calendar::{CalendarEventFields, CalendarService, RestCalendarService, format_event_title};
pub use email::{BookingEmail, ConsoleEmailService, EmailService, SmtpEmailService};
pub use error::ConnectorError;
