// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Events that do not fit the current state must leave it untouched.

use super::helpers::{APPROVER, REQUESTER, approved_snapshot, requested_snapshot};
use crate::{BookingEvent, Snapshot, Transition, apply};
use room_book_domain::ServiceCategory;

fn assert_no_op(transition: &Transition, before: &Snapshot) {
    assert!(!transition.changed);
    assert_eq!(transition.snapshot, *before);
    assert!(transition.milestone.is_none());
    assert!(transition.history.is_empty());
}

#[test]
fn test_check_in_from_requested_is_ignored() {
    let snapshot = requested_snapshot(&[]);
    let transition = apply(
        &snapshot,
        &BookingEvent::CheckIn {
            email: String::from(REQUESTER),
        },
    );
    assert_no_op(&transition, &snapshot);
}

#[test]
fn test_check_out_without_check_in_is_ignored() {
    let snapshot = approved_snapshot(&[]);
    let transition = apply(
        &snapshot,
        &BookingEvent::CheckOut {
            email: String::from(REQUESTER),
        },
    );
    assert_no_op(&transition, &snapshot);
}

#[test]
fn test_service_approve_outside_services_request_is_ignored() {
    let snapshot = requested_snapshot(&[ServiceCategory::Staff]);
    let transition = apply(
        &snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert_no_op(&transition, &snapshot);
}

#[test]
fn test_service_approve_for_unrequested_category_is_ignored() {
    let snapshot = requested_snapshot(&[ServiceCategory::Staff]);
    let first = apply(
        &snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    );
    let second = apply(
        &first.snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    );
    let transition = apply(
        &second.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Catering,
            email: String::from(APPROVER),
        },
    );
    assert_no_op(&transition, &second.snapshot);
}

#[test]
fn test_duplicate_service_approve_is_ignored() {
    let snapshot = requested_snapshot(&[ServiceCategory::Staff, ServiceCategory::Catering]);
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
    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert!(current.changed);
    let before = current.snapshot.clone();
    let repeat = apply(
        &before,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert_no_op(&repeat, &before);
}

#[test]
fn test_terminal_states_absorb_all_events() {
    let snapshot = approved_snapshot(&[]);
    let closed = apply(&snapshot, &BookingEvent::AutoClose);
    assert!(closed.snapshot.value.is_terminal());

    for event in [
        BookingEvent::Approve {
            email: String::from(APPROVER),
        },
        BookingEvent::Cancel {
            email: String::from(REQUESTER),
        },
        BookingEvent::CheckIn {
            email: String::from(REQUESTER),
        },
        BookingEvent::AutoClose,
    ] {
        let transition = apply(&closed.snapshot, &event);
        assert_no_op(&transition, &closed.snapshot);
    }
}

#[test]
fn test_cancel_during_service_closeout_is_ignored() {
    let snapshot = approved_snapshot(&[ServiceCategory::Staff]);
    let checked_in = apply(
        &snapshot,
        &BookingEvent::CheckIn {
            email: String::from(REQUESTER),
        },
    );
    let checked_out = apply(
        &checked_in.snapshot,
        &BookingEvent::CheckOut {
            email: String::from(REQUESTER),
        },
    );

    let transition = apply(
        &checked_out.snapshot,
        &BookingEvent::Cancel {
            email: String::from(REQUESTER),
        },
    );
    assert_no_op(&transition, &checked_out.snapshot);
}

#[test]
fn test_decline_from_approved_is_ignored() {
    let snapshot = approved_snapshot(&[]);
    let transition = apply(
        &snapshot,
        &BookingEvent::Decline {
            email: String::from(APPROVER),
            reason: None,
        },
    );
    assert_no_op(&transition, &snapshot);
}
