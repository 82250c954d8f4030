// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the adapter tests.

use crate::handlers::{self, BookingDeps};
use crate::request_response::{
    ServiceActionRequest, SubmitBookingRequest, SubmitBookingResponse, TransitionRequest,
    TransitionResponse,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use room_book_connectors::mocks::{RecordingCalendarService, RecordingEmailService};
use room_book_connectors::{CalendarService, EmailService};
use room_book_domain::{Room, ServiceCategory};
use room_book_persistence::Persistence;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const REQUESTER: &str = "requester@university.edu";
pub const LIAISON: &str = "liaison@university.edu";
pub const APPROVER: &str = "approver@university.edu";

/// Adapter dependencies over an in-memory store and recording doubles.
pub struct TestHarness {
    pub deps: BookingDeps,
    pub calendar: Arc<RecordingCalendarService>,
    pub email: Arc<RecordingEmailService>,
}

pub fn harness() -> TestHarness {
    let persistence = Persistence::new_in_memory().expect("in-memory store");
    let calendar = Arc::new(RecordingCalendarService::new());
    let email = Arc::new(RecordingEmailService::new());
    let calendar_service: Arc<dyn CalendarService> = Arc::clone(&calendar) as Arc<dyn CalendarService>;
    let email_service: Arc<dyn EmailService> = Arc::clone(&email) as Arc<dyn EmailService>;
    let deps = BookingDeps::new(
        Arc::new(Mutex::new(persistence)),
        calendar_service,
        email_service,
    );
    TestHarness {
        deps,
        calendar,
        email,
    }
}

pub fn auto_room() -> Room {
    Room::new(11, "Recording Studio", "cal-studio", true)
}

pub fn manual_room() -> Room {
    Room::new(42, "Seminar Room", "cal-seminar", false)
}

pub fn event_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).single().expect("valid date")
}

pub fn submit_request(
    rooms: Vec<Room>,
    services: &[ServiceCategory],
) -> SubmitBookingRequest {
    SubmitBookingRequest {
        tenant: String::from("media-commons"),
        title: String::from("Thesis recording session"),
        requester_email: String::from(REQUESTER),
        start_date: event_start(),
        end_date: event_start() + Duration::hours(2),
        selected_rooms: rooms,
        services_requested: services.iter().copied().collect::<BTreeSet<_>>(),
        is_vip: false,
        is_walk_in: false,
        tenant_requires_manual_approval: false,
    }
}

pub async fn submit(
    harness: &TestHarness,
    request: &SubmitBookingRequest,
) -> SubmitBookingResponse {
    handlers::submit_booking(&harness.deps, request)
        .await
        .expect("submission succeeds")
}

pub async fn send_event(
    harness: &TestHarness,
    calendar_event_id: &str,
    event_type: &str,
    email: &str,
) -> TransitionResponse {
    handlers::transition_booking(
        &harness.deps,
        &TransitionRequest {
            calendar_event_id: calendar_event_id.to_string(),
            event_type: event_type.to_string(),
            email: email.to_string(),
            reason: None,
        },
    )
    .await
    .expect("transition succeeds")
}

pub async fn send_service_action(
    harness: &TestHarness,
    calendar_event_id: &str,
    service_type: &str,
    action: &str,
    email: &str,
) -> TransitionResponse {
    handlers::service_action(
        &harness.deps,
        &ServiceActionRequest {
            calendar_event_id: calendar_event_id.to_string(),
            service_type: service_type.to_string(),
            action: action.to_string(),
            email: email.to_string(),
            reason: None,
        },
    )
    .await
    .expect("service action succeeds")
}
