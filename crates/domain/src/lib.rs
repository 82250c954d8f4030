// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod booking;
mod error;
mod services;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking::Booking;
pub use error::DomainError;
pub use services::{
    CloseoutProgress, Rendezvous, ServiceTrack, ServiceTracks, evaluate_rendezvous,
};
pub use status::BookingStatus;
pub use types::{Room, ServiceAction, ServiceCategory, Tenant};
pub use validation::{validate_email, validate_interval, validate_title};

/// Default reason recorded when a decline event carries no reason of its own.
pub const DEFAULT_DECLINE_REASON: &str = "Service requirements could not be fulfilled";

/// Actor identity recorded for transitions triggered by the system itself
/// (scheduled jobs, service-caused overall declines).
pub const SYSTEM_ACTOR: &str = "System";
