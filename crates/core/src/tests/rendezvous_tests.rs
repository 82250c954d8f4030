// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multi-service rendezvous behavior of the review region.

use super::helpers::{APPROVER, requested_snapshot};
use crate::{Attribution, BookingEvent, StateValue, Transition, apply};
use room_book_domain::ServiceCategory;

fn services_request(categories: &[ServiceCategory]) -> Transition {
    let snapshot = requested_snapshot(categories);
    let first = apply(
        &snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    );
    apply(
        &first.snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    )
}

#[test]
fn test_partial_approvals_stay_in_services_request() {
    let categories = [
        ServiceCategory::Staff,
        ServiceCategory::Equipment,
        ServiceCategory::Catering,
    ];
    let mut current = services_request(&categories);
    assert_eq!(current.snapshot.value, StateValue::ServicesRequest);

    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert_eq!(current.snapshot.value, StateValue::ServicesRequest);
    assert!(current.milestone.is_none());
    assert_eq!(current.history.len(), 1);

    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Equipment,
            email: String::from(APPROVER),
        },
    );
    assert_eq!(current.snapshot.value, StateValue::ServicesRequest);
}

#[test]
fn test_last_approval_completes_the_rendezvous() {
    let categories = [ServiceCategory::Staff, ServiceCategory::Catering];
    let mut current = services_request(&categories);

    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Catering,
            email: String::from(APPROVER),
        },
    );
    assert_eq!(current.snapshot.value, StateValue::ServicesRequest);

    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    assert_eq!(current.snapshot.value, StateValue::Approved);
    let milestone = current.milestone.expect("completion is a milestone");
    assert_eq!(milestone.attribution, Some(Attribution::FinalApproved));
    // One note for the track decision, one for the promotion.
    assert_eq!(current.history.len(), 2);
}

#[test]
fn test_approval_order_does_not_matter() {
    let categories = [ServiceCategory::Staff, ServiceCategory::Equipment];
    for order in [
        [ServiceCategory::Staff, ServiceCategory::Equipment],
        [ServiceCategory::Equipment, ServiceCategory::Staff],
    ] {
        let mut current = services_request(&categories);
        for category in order {
            current = apply(
                &current.snapshot,
                &BookingEvent::ServiceApprove {
                    category,
                    email: String::from(APPROVER),
                },
            );
        }
        assert_eq!(current.snapshot.value, StateValue::Approved);
    }
}

#[test]
fn test_single_decline_overrides_prior_approvals() {
    let categories = [ServiceCategory::Staff, ServiceCategory::Catering];
    let mut current = services_request(&categories);

    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Staff,
            email: String::from(APPROVER),
        },
    );
    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceDecline {
            category: ServiceCategory::Catering,
            email: String::from(APPROVER),
            reason: Some(String::from("no caterer available")),
        },
    );
    assert_eq!(current.snapshot.value, StateValue::Declined);
}

#[test]
fn test_approved_tracks_are_recorded_in_context() {
    let categories = [ServiceCategory::Staff, ServiceCategory::Equipment];
    let mut current = services_request(&categories);
    current = apply(
        &current.snapshot,
        &BookingEvent::ServiceApprove {
            category: ServiceCategory::Equipment,
            email: String::from(APPROVER),
        },
    );
    let approved = current.snapshot.context.services.approved();
    assert!(approved.contains(&ServiceCategory::Equipment));
    assert!(!approved.contains(&ServiceCategory::Staff));
}
