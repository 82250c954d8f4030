// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entry adapters, side-effect executor, and API DTOs.
//!
//! This crate sits between the HTTP surface and the pure lifecycle machine.
//! Adapters own validation, per-booking locking, and the
//! load/apply/execute sequence; the HTTP layer only translates payloads and
//! maps [`ApiError`] variants to status codes.

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

pub mod auth;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod locks;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, verify_scheduler_token};
pub use error::ApiError;
pub use executor::SideEffectExecutor;
pub use handlers::BookingDeps;
pub use locks::BookingLocks;
