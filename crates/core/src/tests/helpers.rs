// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{BookingEvent, Context, Snapshot, apply};
use chrono::{Duration, TimeZone, Utc};
use room_book_domain::{
    Booking, BookingStatus, CloseoutProgress, Room, ServiceCategory, ServiceTracks, Tenant,
};
use std::collections::BTreeSet;

pub const REQUESTER: &str = "requester@university.edu";
pub const LIAISON: &str = "liaison@university.edu";
pub const APPROVER: &str = "approver@university.edu";

pub fn manual_room() -> Room {
    Room::new(101, "Seminar Room", "cal-room-101", false)
}

pub fn auto_room() -> Room {
    Room::new(202, "Huddle Room", "cal-room-202", true)
}

pub fn context_with(rooms: Vec<Room>, services: &[ServiceCategory]) -> Context {
    let requested: BTreeSet<ServiceCategory> = services.iter().copied().collect();
    let start = Utc.with_ymd_and_hms(2026, 3, 10, 14, 0, 0).unwrap();
    Context {
        tenant: Tenant::new("media-commons"),
        calendar_event_id: String::from("cal-evt-1"),
        email: String::from(REQUESTER),
        selected_rooms: rooms,
        start_date: start,
        end_date: start + Duration::hours(2),
        is_vip: false,
        is_walk_in: false,
        tenant_requires_manual_approval: false,
        services: ServiceTracks::from_requested(&requested),
        closeout: CloseoutProgress::default(),
        decline_reason: None,
    }
}

/// A snapshot in `Requested` for a manual-approval room.
pub fn requested_snapshot(services: &[ServiceCategory]) -> Snapshot {
    Snapshot::new(context_with(vec![manual_room()], services))
}

/// Drives a requested snapshot through liaison and final approval.
pub fn approved_snapshot(services: &[ServiceCategory]) -> Snapshot {
    let mut snapshot = requested_snapshot(services);
    snapshot = apply(
        &snapshot,
        &BookingEvent::Approve {
            email: String::from(LIAISON),
        },
    )
    .snapshot;
    snapshot = apply(
        &snapshot,
        &BookingEvent::Approve {
            email: String::from(APPROVER),
        },
    )
    .snapshot;
    for category in services.iter().copied() {
        snapshot = apply(
            &snapshot,
            &BookingEvent::ServiceApprove {
                category,
                email: String::from(APPROVER),
            },
        )
        .snapshot;
    }
    snapshot
}

/// A booking record matching a snapshot closely enough for reconciliation.
pub fn booking_for(snapshot: &Snapshot) -> Booking {
    let context = &snapshot.context;
    Booking {
        booking_id: 1,
        calendar_event_id: context.calendar_event_id.clone(),
        request_number: 7,
        tenant: context.tenant.clone(),
        title: String::from("Thesis defense"),
        requester_email: context.email.clone(),
        start_date: context.start_date,
        end_date: context.end_date,
        requested_at: context.start_date - chrono::Duration::days(3),
        status: snapshot.value.status(),
        selected_rooms: context.selected_rooms.clone(),
        services_requested: context.services.requested(),
        services_approved: context.services.approved(),
        is_vip: context.is_vip,
        is_walk_in: context.is_walk_in,
        decline_reason: context.decline_reason.clone(),
        first_approved_at: None,
        first_approved_by: None,
        final_approved_at: None,
        final_approved_by: None,
        declined_at: None,
        declined_by: None,
        canceled_at: None,
        canceled_by: None,
        checked_in_at: None,
        checked_in_by: None,
        checked_out_at: None,
        checked_out_by: None,
        no_showed_at: None,
        no_showed_by: None,
    }
}

pub fn assert_status(snapshot: &Snapshot, status: BookingStatus) {
    assert_eq!(snapshot.value.status(), status);
}
