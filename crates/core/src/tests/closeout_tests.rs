// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service closeout gating for closing a booking.

use super::helpers::{APPROVER, REQUESTER, approved_snapshot};
use crate::{BookingEvent, StateValue, apply};
use room_book_domain::{BookingStatus, ServiceCategory};

fn closeout_snapshot(categories: &[ServiceCategory]) -> crate::Snapshot {
    let approved = approved_snapshot(categories);
    let checked_in = apply(
        &approved,
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
    assert_eq!(checked_out.snapshot.value, StateValue::ServiceCloseout);
    checked_out.snapshot
}

#[test]
fn test_closed_unreachable_until_all_services_closed_out() {
    let categories = [ServiceCategory::Staff, ServiceCategory::Catering];
    let snapshot = closeout_snapshot(&categories);

    let partial = apply(
        &snapshot,
        &BookingEvent::ServiceCloseout {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert_eq!(partial.snapshot.value, StateValue::ServiceCloseout);
    assert!(partial.changed);
    assert!(partial.milestone.is_none());

    let complete = apply(
        &partial.snapshot,
        &BookingEvent::ServiceCloseout {
            category: ServiceCategory::Catering,
            email: String::from(APPROVER),
        },
    );
    assert_eq!(complete.snapshot.value, StateValue::Closed);
    let milestone = complete.milestone.expect("final closeout is a milestone");
    assert_eq!(milestone.status, BookingStatus::Closed);
}

#[test]
fn test_duplicate_closeout_is_ignored() {
    let snapshot = closeout_snapshot(&[ServiceCategory::Staff, ServiceCategory::Equipment]);
    let first = apply(
        &snapshot,
        &BookingEvent::ServiceCloseout {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    let repeat = apply(
        &first.snapshot,
        &BookingEvent::ServiceCloseout {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert!(!repeat.changed);
    assert_eq!(repeat.snapshot.value, StateValue::ServiceCloseout);
}

#[test]
fn test_closeout_for_unapproved_category_is_ignored() {
    let snapshot = closeout_snapshot(&[ServiceCategory::Staff]);
    let transition = apply(
        &snapshot,
        &BookingEvent::ServiceCloseout {
            category: ServiceCategory::Cleaning,
            email: String::from(APPROVER),
        },
    );
    assert!(!transition.changed);
}

#[test]
fn test_closeout_records_history_note() {
    let snapshot = closeout_snapshot(&[ServiceCategory::Staff]);
    let transition = apply(
        &snapshot,
        &BookingEvent::ServiceCloseout {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert_eq!(transition.snapshot.value, StateValue::Closed);
    assert!(
        transition
            .history
            .iter()
            .any(|note| note.note.as_deref().is_some_and(|n| n.contains("Closed Out")))
    );
}
