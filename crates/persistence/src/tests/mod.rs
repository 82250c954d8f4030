// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use chrono::{DateTime, Duration, TimeZone, Utc};
use room_book::Snapshot;
use room_book_domain::{Booking, BookingStatus, Room, ServiceCategory, Tenant};
use std::collections::BTreeSet;

pub fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 2, 10, 0, 0).unwrap()
}

pub fn test_room() -> Room {
    Room::new(101, "Seminar Room", "cal-room-101", false)
}

pub fn test_booking(calendar_event_id: &str) -> Booking {
    let start: DateTime<Utc> = test_start();
    Booking {
        booking_id: 0,
        calendar_event_id: calendar_event_id.to_string(),
        request_number: 1,
        tenant: Tenant::new("media-commons"),
        title: String::from("Thesis defense"),
        requester_email: String::from("requester@university.edu"),
        start_date: start,
        end_date: start + Duration::hours(2),
        requested_at: start - Duration::days(3),
        status: BookingStatus::Requested,
        selected_rooms: vec![test_room()],
        services_requested: BTreeSet::from([ServiceCategory::Staff]),
        services_approved: BTreeSet::new(),
        is_vip: false,
        is_walk_in: false,
        decline_reason: None,
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

pub fn test_snapshot(booking: &Booking) -> Snapshot {
    Snapshot::new(room_book::Context {
        tenant: booking.tenant.clone(),
        calendar_event_id: booking.calendar_event_id.clone(),
        email: booking.requester_email.clone(),
        selected_rooms: booking.selected_rooms.clone(),
        start_date: booking.start_date,
        end_date: booking.end_date,
        is_vip: booking.is_vip,
        is_walk_in: booking.is_walk_in,
        tenant_requires_manual_approval: false,
        services: room_book_domain::ServiceTracks::from_requested(&booking.services_requested),
        closeout: room_book_domain::CloseoutProgress::default(),
        decline_reason: None,
    })
}
