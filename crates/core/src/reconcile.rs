// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The modification reconciler.
//!
//! Editing an already-submitted booking replaces its calendar event, so a
//! new machine snapshot must be built around the new calendar event id. The
//! reconciler decides whether the edit preserves the prior approval (the
//! rebuilt snapshot rests directly in `Approved`, approval attribution and
//! service flags carried forward) or resets the booking to a fresh
//! `Requested` cycle (approval fields explicitly deleted by the adapter).

use crate::state::{Context, Snapshot, StateValue};
use room_book_domain::Booking;

/// The reconciler's decision for one modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// The rebuilt snapshot, keyed to the new calendar event id.
    pub snapshot: Snapshot,
    /// True if the prior approval was preserved. When true the adapter runs
    /// the final-approval side-effect sequence (calendar update and
    /// confirmation email) once against the new calendar event id, without
    /// re-logging history for the re-derived state; when false the adapter
    /// clears every approval timestamp/actor pair from the record.
    pub preserved: bool,
}

/// Determines whether a booking's prior snapshot counts as approved for
/// modification purposes.
///
/// True when the machine rests in `Approved`, when a final approval has
/// already been stamped, or when the booking reached the services-request
/// region with a liaison pre-approval recorded.
#[must_use]
pub fn was_approved(snapshot: &Snapshot, booking: &Booking) -> bool {
    snapshot.value == StateValue::Approved
        || booking.has_final_approval()
        || (snapshot.value == StateValue::ServicesRequest && booking.has_first_approval())
}

/// Reconciles a modification against the prior snapshot.
///
/// `new_context` is built by the adapter from the edited fields and already
/// carries the new calendar event id. Service tracks and closeout progress
/// are carried forward unchanged on the preserve path; the reset path starts
/// a fresh `Requested` cycle with the edited request's own tracks.
#[must_use]
pub fn reconcile(prior: &Snapshot, booking: &Booking, new_context: Context) -> ReconcilePlan {
    if was_approved(prior, booking) {
        let mut context: Context = new_context;
        context.services = prior.context.services.clone();
        context.closeout = prior.context.closeout.clone();
        return ReconcilePlan {
            snapshot: Snapshot {
                value: StateValue::Approved,
                context,
            },
            preserved: true,
        };
    }

    ReconcilePlan {
        snapshot: Snapshot::requested(new_context),
        preserved: false,
    }
}
