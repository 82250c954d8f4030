// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking lifecycle state machine.
//!
//! This crate is pure: sending an event computes the new snapshot and the
//! side effects the transition requires without performing any I/O. Entry
//! adapters load the persisted snapshot, call [`apply`] exactly once, and
//! hand the resulting [`Transition`] to the side-effect executor.
//!
//! An event with no transition defined for the current state is a silent
//! no-op: the snapshot is returned unchanged and no side effects are
//! requested. The machine never rejects an event.

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

mod apply;
mod event;
mod reconcile;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{Attribution, HistoryNote, Milestone, Transition, apply};
pub use event::BookingEvent;
pub use reconcile::{ReconcilePlan, reconcile, was_approved};
pub use state::{Context, Snapshot, StateValue};
