// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    REQUESTER, auto_room, event_start, harness, send_event, submit, submit_request,
};
use crate::handlers;
use chrono::{DateTime, Duration, Utc};
use room_book_domain::SYSTEM_ACTOR;

/// A sweep time 31 minutes after the fixture bookings end.
fn sweep_time() -> DateTime<Utc> {
    event_start() + Duration::hours(2) + Duration::minutes(31)
}

#[tokio::test]
async fn test_overdue_checked_in_booking_is_checked_out_by_the_system() {
    let h = harness();
    let submitted = submit(&h, &submit_request(vec![auto_room()], &[])).await;
    send_event(&h, &submitted.calendar_event_id, "checkIn", REQUESTER).await;

    let summary = handlers::run_auto_checkout(&h.deps, sweep_time(), false)
        .await
        .expect("sweep succeeds");
    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.checked_out, 1);
    assert_eq!(summary.failed, 0);

    let view = handlers::get_booking(&h.deps, &submitted.calendar_event_id)
        .await
        .expect("booking exists");
    assert_eq!(view.status, "CHECKED_OUT");
    assert_eq!(view.checked_out_by.as_deref(), Some(SYSTEM_ACTOR));

    let history = handlers::get_history(&h.deps, &submitted.calendar_event_id)
        .await
        .expect("history exists");
    let last = history.last().expect("at least one entry");
    assert_eq!(last.status, "CHECKED_OUT");
    assert_eq!(last.changed_by, SYSTEM_ACTOR);
}

#[tokio::test]
async fn test_overdue_approved_booking_is_force_closed() {
    let h = harness();
    let submitted = submit(&h, &submit_request(vec![auto_room()], &[])).await;

    let summary = handlers::run_auto_checkout(&h.deps, sweep_time(), false)
        .await
        .expect("sweep succeeds");
    assert_eq!(summary.closed, 1);
    assert_eq!(summary.checked_out, 0);

    let view = handlers::get_booking(&h.deps, &submitted.calendar_event_id)
        .await
        .expect("booking exists");
    assert_eq!(view.status, "CLOSED");

    let history = handlers::get_history(&h.deps, &submitted.calendar_event_id)
        .await
        .expect("history exists");
    let last = history.last().expect("at least one entry");
    assert_eq!(last.note.as_deref(), Some("Closed by scheduled auto-close"));
}

#[tokio::test]
async fn test_recently_ended_bookings_are_left_alone() {
    let h = harness();
    let submitted = submit(&h, &submit_request(vec![auto_room()], &[])).await;
    send_event(&h, &submitted.calendar_event_id, "checkIn", REQUESTER).await;

    // Ten minutes past the end is inside the grace period.
    let early = event_start() + Duration::hours(2) + Duration::minutes(10);
    let summary = handlers::run_auto_checkout(&h.deps, early, false)
        .await
        .expect("sweep succeeds");
    assert_eq!(summary.candidates, 0);

    let view = handlers::get_booking(&h.deps, &submitted.calendar_event_id)
        .await
        .expect("booking exists");
    assert_eq!(view.status, "CHECKED_IN");
}

#[tokio::test]
async fn test_bookings_ended_over_a_day_ago_are_outside_the_window() {
    let h = harness();
    let submitted = submit(&h, &submit_request(vec![auto_room()], &[])).await;
    send_event(&h, &submitted.calendar_event_id, "checkIn", REQUESTER).await;

    let late = event_start() + Duration::days(3);
    let summary = handlers::run_auto_checkout(&h.deps, late, false)
        .await
        .expect("sweep succeeds");
    assert_eq!(summary.candidates, 0);
}

#[tokio::test]
async fn test_dry_run_reports_without_mutating() {
    let h = harness();
    let submitted = submit(&h, &submit_request(vec![auto_room()], &[])).await;
    send_event(&h, &submitted.calendar_event_id, "checkIn", REQUESTER).await;

    let summary = handlers::run_auto_checkout(&h.deps, sweep_time(), true)
        .await
        .expect("sweep succeeds");
    assert!(summary.dry_run);
    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.checked_out, 1);

    let view = handlers::get_booking(&h.deps, &submitted.calendar_event_id)
        .await
        .expect("booking exists");
    assert_eq!(view.status, "CHECKED_IN", "dry run must not mutate");
}

#[tokio::test]
async fn test_sweep_handles_a_mixed_batch() {
    let h = harness();
    let checked_in = submit(&h, &submit_request(vec![auto_room()], &[])).await;
    send_event(&h, &checked_in.calendar_event_id, "checkIn", REQUESTER).await;
    let approved = submit(&h, &submit_request(vec![auto_room()], &[])).await;
    let closed = submit(&h, &submit_request(vec![auto_room()], &[])).await;
    send_event(&h, &closed.calendar_event_id, "cancel", REQUESTER).await;

    let summary = handlers::run_auto_checkout(&h.deps, sweep_time(), false)
        .await
        .expect("sweep succeeds");
    assert_eq!(summary.candidates, 2, "canceled booking is not a candidate");
    assert_eq!(summary.checked_out, 1);
    assert_eq!(summary.closed, 1);
    assert_eq!(summary.failed, 0);
}
