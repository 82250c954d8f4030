// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decline paths and the default reason contract.

use super::helpers::{APPROVER, LIAISON, requested_snapshot};
use crate::{Attribution, BookingEvent, StateValue, apply};
use room_book_domain::{BookingStatus, DEFAULT_DECLINE_REASON, SYSTEM_ACTOR, ServiceCategory};

#[test]
fn test_decline_from_requested() {
    let snapshot = requested_snapshot(&[]);
    let transition = apply(
        &snapshot,
        &BookingEvent::Decline {
            email: String::from(APPROVER),
            reason: Some(String::from("room under renovation")),
        },
    );
    assert_eq!(transition.snapshot.value, StateValue::Declined);
    assert_eq!(
        transition.snapshot.context.decline_reason.as_deref(),
        Some("room under renovation")
    );
    let milestone = transition.milestone.expect("decline is a milestone");
    assert_eq!(milestone.status, BookingStatus::Declined);
    assert_eq!(milestone.attribution, Some(Attribution::Declined));
    assert_eq!(milestone.actor.email, APPROVER);
}

#[test]
fn test_decline_without_reason_uses_default() {
    let snapshot = requested_snapshot(&[]);
    let first = apply(
        &snapshot,
        &BookingEvent::Approve {
            email: String::from(LIAISON),
        },
    );
    assert_eq!(first.snapshot.value, StateValue::PreApproved);

    let declined = apply(
        &first.snapshot,
        &BookingEvent::Decline {
            email: String::from(APPROVER),
            reason: None,
        },
    );
    assert_eq!(declined.snapshot.value, StateValue::Declined);
    assert_eq!(
        declined.snapshot.context.decline_reason.as_deref(),
        Some(DEFAULT_DECLINE_REASON)
    );
}

#[test]
fn test_service_decline_declines_the_whole_booking() {
    let snapshot = requested_snapshot(&[ServiceCategory::Staff]);
    let mut current = apply(
        &snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    );
    current = apply(
        &current.snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    );
    assert_eq!(current.snapshot.value, StateValue::ServicesRequest);

    let declined = apply(
        &current.snapshot,
        &BookingEvent::ServiceDecline {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
            reason: Some(String::from("staff shortage")),
        },
    );
    assert_eq!(declined.snapshot.value, StateValue::Declined);
    assert!(
        declined
            .snapshot
            .context
            .decline_reason
            .as_deref()
            .is_some_and(|reason| reason.contains("staff shortage"))
    );

    // Track decision note first, then the system decline note.
    assert_eq!(declined.history.len(), 2);
    assert_eq!(declined.history[0].changed_by, APPROVER);
    assert_eq!(declined.history[1].changed_by, SYSTEM_ACTOR);

    let milestone = declined.milestone.expect("service decline is a milestone");
    assert_eq!(milestone.status, BookingStatus::Declined);
    assert!(milestone.actor.is_system());
}

#[test]
fn test_decline_is_terminal() {
    let snapshot = requested_snapshot(&[]);
    let declined = apply(
        &snapshot,
        &BookingEvent::Decline {
            email: String::from(APPROVER),
            reason: None,
        },
    );
    let retry = apply(
        &declined.snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    );
    assert!(!retry.changed);
    assert_eq!(retry.snapshot.value, StateValue::Declined);
}
