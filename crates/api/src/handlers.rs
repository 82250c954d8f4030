// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Entry adapters.
//!
//! Each adapter validates its payload, loads the persisted snapshot, calls
//! the lifecycle machine exactly once, and hands the committed transition to
//! the side-effect executor. Adapters never branch on booking state
//! themselves; an event the machine has no transition for comes back as
//! `changed: false` and nothing is mutated.

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::executor::{SideEffectExecutor, event_description, header_message, primary_calendar_id};
use crate::locks::BookingLocks;
use crate::request_response::{
    AutoCheckoutSummary, BookingView, HistoryEntryView, ModifyBookingRequest,
    ModifyBookingResponse, ServiceActionRequest, SubmitBookingRequest, SubmitBookingResponse,
    TransitionRequest, TransitionResponse,
};
use chrono::{DateTime, Duration, Utc};
use room_book::{BookingEvent, Context, Snapshot, apply, reconcile};
use room_book_audit::HistoryLogEntry;
use room_book_connectors::{
    BookingEmail, CalendarEventFields, CalendarService, EmailService, format_event_title,
};
use room_book_domain::{
    Booking, BookingStatus, DomainError, SYSTEM_ACTOR, ServiceAction, ServiceCategory,
    ServiceTracks, Tenant, validate_email, validate_interval, validate_title,
};
use room_book_persistence::Persistence;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared dependencies of the entry adapters.
pub struct BookingDeps {
    /// The booking store.
    pub persistence: Arc<Mutex<Persistence>>,
    /// The calendar the booking events live on.
    pub calendar: Arc<dyn CalendarService>,
    /// The notification mailer.
    pub email: Arc<dyn EmailService>,
    /// The transition side-effect executor.
    pub executor: SideEffectExecutor,
    /// Per-booking serialization locks.
    pub locks: BookingLocks,
}

impl BookingDeps {
    /// Wires the adapters' dependencies together.
    #[must_use]
    pub fn new(
        persistence: Arc<Mutex<Persistence>>,
        calendar: Arc<dyn CalendarService>,
        email: Arc<dyn EmailService>,
    ) -> Self {
        let executor = SideEffectExecutor::new(Arc::clone(&calendar), Arc::clone(&email));
        Self {
            persistence,
            calendar,
            email,
            executor,
            locks: BookingLocks::new(),
        }
    }
}

/// Submits a new booking.
///
/// Routing happens here, once, at submission: the initial snapshot lands in
/// Approved (all rooms auto-approve, no services, no tenant override),
/// `ServicesRequest` (VIP or walk-in with services), or `Requested`. The
/// calendar event is created before anything is persisted; if the calendar
/// is unreachable the submission fails and no record exists.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for payload validation failures and
/// `ApiError::Internal` if the calendar event or the record cannot be
/// created.
#[allow(clippy::too_many_lines)]
pub async fn submit_booking(
    deps: &BookingDeps,
    request: &SubmitBookingRequest,
) -> Result<SubmitBookingResponse, ApiError> {
    validate_submission(request)?;
    let tenant = Tenant::new(&request.tenant);

    let mut context = Context {
        tenant: tenant.clone(),
        calendar_event_id: String::new(),
        email: request.requester_email.clone(),
        selected_rooms: request.selected_rooms.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        is_vip: request.is_vip,
        is_walk_in: request.is_walk_in,
        tenant_requires_manual_approval: request.tenant_requires_manual_approval,
        services: ServiceTracks::from_requested(&request.services_requested),
        closeout: room_book_domain::CloseoutProgress::default(),
        decline_reason: None,
    };
    let status = Snapshot::new(context.clone()).value.status();

    let room_ids: Vec<i64> = request.selected_rooms.iter().map(|r| r.room_id).collect();
    let primary = request.selected_rooms[0].calendar_id.clone();
    let attendees: Vec<String> = request.selected_rooms[1..]
        .iter()
        .map(|room| room.calendar_id.clone())
        .collect();

    let request_number = {
        let mut persistence = deps.persistence.lock().await;
        persistence.next_request_number(&tenant)?
    };

    let fields = CalendarEventFields {
        title: format_event_title(status, &room_ids, &request.title),
        description: format!("Request #{request_number} for {}", request.requester_email),
    };
    let calendar_event_id = deps
        .calendar
        .create_event(
            &primary,
            &fields,
            request.start_date,
            request.end_date,
            &attendees,
        )
        .await
        .map_err(|err| ApiError::Internal {
            message: format!("calendar event creation failed: {err}"),
        })?;
    context.calendar_event_id.clone_from(&calendar_event_id);
    let snapshot = Snapshot::new(context);

    let now = Utc::now();
    let mut booking = Booking {
        booking_id: 0,
        calendar_event_id: calendar_event_id.clone(),
        request_number,
        tenant,
        title: request.title.clone(),
        requester_email: request.requester_email.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        requested_at: now,
        status,
        selected_rooms: request.selected_rooms.clone(),
        services_requested: request.services_requested.clone(),
        services_approved: BTreeSet::new(),
        is_vip: request.is_vip,
        is_walk_in: request.is_walk_in,
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
    };
    {
        let mut persistence = deps.persistence.lock().await;
        booking.booking_id = persistence.create_booking(&booking, &snapshot)?;
        let entry = HistoryLogEntry::new(
            booking.booking_id,
            calendar_event_id.clone(),
            status,
            request.requester_email.clone(),
            request_number,
            None,
            now,
        );
        persistence.append_history(&entry)?;
    }

    send_notification(deps, &booking, status, header_message(status)).await;

    Ok(SubmitBookingResponse {
        booking_id: booking.booking_id,
        calendar_event_id,
        request_number,
        status: status.to_string(),
    })
}

/// Fetches one booking by calendar event id.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no booking carries the id.
pub async fn get_booking(
    deps: &BookingDeps,
    calendar_event_id: &str,
) -> Result<BookingView, ApiError> {
    let mut persistence = deps.persistence.lock().await;
    let (booking, _snapshot) = persistence.get_booking_by_calendar_event(calendar_event_id)?;
    Ok(BookingView::from(&booking))
}

/// Fetches one booking's history timeline, oldest entry first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no booking carries the id.
pub async fn get_history(
    deps: &BookingDeps,
    calendar_event_id: &str,
) -> Result<Vec<HistoryEntryView>, ApiError> {
    let mut persistence = deps.persistence.lock().await;
    let (booking, _snapshot) = persistence.get_booking_by_calendar_event(calendar_event_id)?;
    let entries = persistence.get_history(booking.booking_id)?;
    Ok(entries.iter().map(HistoryEntryView::from).collect())
}

/// Sends one interactive lifecycle event to a booking.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown event type or malformed
/// email, `ApiError::ResourceNotFound` for an unknown booking, and
/// `ApiError::Internal` if a fatal side effect fails.
pub async fn transition_booking(
    deps: &BookingDeps,
    request: &TransitionRequest,
) -> Result<TransitionResponse, ApiError> {
    let user = AuthenticatedUser::from_email(&request.email)?;
    let event =
        BookingEvent::parse_transition(&request.event_type, &user.email, request.reason.clone())
            .map_err(|err| ApiError::invalid("event_type", &err))?;
    dispatch_event(deps, &request.calendar_event_id, &event).await
}

/// Acts on one parallel service approval track.
///
/// A decline on any track declines the whole booking; the final approval
/// completes the rendezvous and the final closeout closes the booking.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown category or action,
/// `ApiError::ResourceNotFound` for an unknown booking, and
/// `ApiError::Internal` if a fatal side effect fails.
pub async fn service_action(
    deps: &BookingDeps,
    request: &ServiceActionRequest,
) -> Result<TransitionResponse, ApiError> {
    let user = AuthenticatedUser::from_email(&request.email)?;
    let category: ServiceCategory = request
        .service_type
        .parse()
        .map_err(|err: DomainError| ApiError::invalid("service_type", &err))?;
    let action: ServiceAction = request
        .action
        .parse()
        .map_err(|err: DomainError| ApiError::invalid("action", &err))?;
    let event = BookingEvent::for_service(category, action, &user.email, request.reason.clone());
    dispatch_event(deps, &request.calendar_event_id, &event).await
}

/// Loads, applies, and executes one event under the booking's lock.
async fn dispatch_event(
    deps: &BookingDeps,
    calendar_event_id: &str,
    event: &BookingEvent,
) -> Result<TransitionResponse, ApiError> {
    let _guard = deps.locks.acquire(calendar_event_id).await;
    let (mut booking, snapshot) = {
        let mut persistence = deps.persistence.lock().await;
        persistence.get_booking_by_calendar_event(calendar_event_id)?
    };

    let transition = apply(&snapshot, event);
    if !transition.changed {
        return Ok(TransitionResponse {
            calendar_event_id: calendar_event_id.to_string(),
            status: booking.status.to_string(),
            changed: false,
        });
    }

    deps.executor
        .run(&deps.persistence, &mut booking, &transition, Utc::now())
        .await?;
    Ok(TransitionResponse {
        calendar_event_id: calendar_event_id.to_string(),
        status: booking.status.to_string(),
        changed: true,
    })
}

/// Modifies a booking's reservation details.
///
/// A replacement calendar event is created and the old one then deleted,
/// so the booking's external key changes. An edit to a booking that already earned
/// its approval keeps that approval when reconciliation allows; otherwise
/// the booking resets to a fresh request and the approval fields are
/// cleared. The modification itself is logged once, attributed to the
/// editing user.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for payload validation failures or a
/// terminal booking, `ApiError::ResourceNotFound` for an unknown booking,
/// and `ApiError::Internal` if the replacement event or the record write
/// fails.
#[allow(clippy::too_many_lines)]
pub async fn modify_booking(
    deps: &BookingDeps,
    request: &ModifyBookingRequest,
) -> Result<ModifyBookingResponse, ApiError> {
    validate_title(&request.title).map_err(|err| ApiError::invalid("title", &err))?;
    validate_interval(request.start_date, request.end_date)
        .map_err(|err| ApiError::invalid("start_date", &err))?;
    if request.selected_rooms.is_empty() {
        return Err(ApiError::invalid(
            "selected_rooms",
            &DomainError::NoRoomsSelected,
        ));
    }
    let editor = AuthenticatedUser::from_email(&request.modified_by)?;

    let _guard = deps.locks.acquire(&request.calendar_event_id).await;
    let (mut booking, prior) = {
        let mut persistence = deps.persistence.lock().await;
        persistence.get_booking_by_calendar_event(&request.calendar_event_id)?
    };
    if prior.value.is_terminal() {
        return Err(ApiError::InvalidInput {
            field: String::from("calendar_event_id"),
            message: format!(
                "booking in status {} can no longer be modified",
                booking.status
            ),
        });
    }

    let provisional = if room_book::was_approved(&prior, &booking) {
        BookingStatus::Approved
    } else {
        BookingStatus::Requested
    };
    let room_ids: Vec<i64> = request.selected_rooms.iter().map(|r| r.room_id).collect();
    let primary = request.selected_rooms[0].calendar_id.clone();
    let attendees: Vec<String> = request.selected_rooms[1..]
        .iter()
        .map(|room| room.calendar_id.clone())
        .collect();
    let fields = CalendarEventFields {
        title: format_event_title(provisional, &room_ids, &request.title),
        description: event_description(&booking),
    };
    // The replacement event is created first; the create is fatal because
    // the booking needs a valid external key. Only then is the old event
    // removed, best-effort, so a calendar failure never strands the record
    // pointing at an already-deleted event.
    let new_event_id = deps
        .calendar
        .create_event(
            &primary,
            &fields,
            request.start_date,
            request.end_date,
            &attendees,
        )
        .await
        .map_err(|err| ApiError::Internal {
            message: format!("replacement calendar event creation failed: {err}"),
        })?;
    if let Some(calendar_id) = primary_calendar_id(&booking) {
        if let Err(err) = deps
            .calendar
            .delete_event(calendar_id, &booking.calendar_event_id)
            .await
        {
            tracing::warn!(
                booking_id = booking.booking_id,
                calendar_event_id = %booking.calendar_event_id,
                error = %err,
                "stale calendar event delete failed"
            );
        }
    }

    let new_context = Context {
        tenant: booking.tenant.clone(),
        calendar_event_id: new_event_id.clone(),
        email: booking.requester_email.clone(),
        selected_rooms: request.selected_rooms.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        is_vip: booking.is_vip,
        is_walk_in: booking.is_walk_in,
        tenant_requires_manual_approval: prior.context.tenant_requires_manual_approval,
        services: ServiceTracks::from_requested(&request.services_requested),
        closeout: room_book_domain::CloseoutProgress::default(),
        decline_reason: None,
    };
    let plan = reconcile(&prior, &booking, new_context);

    booking.calendar_event_id.clone_from(&new_event_id);
    booking.title.clone_from(&request.title);
    booking.start_date = request.start_date;
    booking.end_date = request.end_date;
    booking.selected_rooms.clone_from(&request.selected_rooms);
    booking.services_requested = request.services_requested.clone();
    booking.status = plan.snapshot.value.status();
    booking.services_approved = plan.snapshot.context.services.approved();
    if !plan.preserved {
        booking.clear_approval_fields();
    }
    let now = Utc::now();
    let note = if plan.preserved {
        "Booking modified; approval preserved"
    } else {
        "Booking modified; approval reset"
    };
    let entry = HistoryLogEntry::new(
        booking.booking_id,
        new_event_id.clone(),
        booking.status,
        editor.email,
        booking.request_number,
        Some(note.to_string()),
        now,
    );
    {
        let mut persistence = deps.persistence.lock().await;
        persistence.update_booking(&booking, &plan.snapshot)?;
        persistence.append_history(&entry)?;
    }

    let header = if plan.preserved {
        "Your booking was updated and remains approved."
    } else {
        "Your booking was updated and requires re-approval."
    };
    send_notification(deps, &booking, booking.status, header).await;

    Ok(ModifyBookingResponse {
        calendar_event_id: new_event_id,
        status: booking.status.to_string(),
        preserved: plan.preserved,
    })
}

/// Runs the scheduled auto-checkout sweep.
///
/// Candidates are bookings whose reserved interval ended within the past 24
/// hours, at least 30 minutes ago, and that are still checked in or still
/// approved. Checked-in bookings are checked out and approved ones
/// force-closed, both attributed to the system actor. Failures are
/// accumulated and the sweep continues; a failing booking never aborts the
/// run. With `dry_run` the summary reports what would happen and nothing is
/// mutated.
///
/// # Errors
///
/// Returns `ApiError::Internal` only if the candidate query itself fails.
pub async fn run_auto_checkout(
    deps: &BookingDeps,
    now: DateTime<Utc>,
    dry_run: bool,
) -> Result<AutoCheckoutSummary, ApiError> {
    let cutoff = now - Duration::minutes(30);
    let window_start = now - Duration::hours(24);
    let candidates: Vec<(String, BookingStatus)> = {
        let mut persistence = deps.persistence.lock().await;
        persistence
            .list_open_past_end(&cutoff)?
            .into_iter()
            .filter(|(booking, _)| booking.end_date >= window_start)
            .map(|(booking, _)| (booking.calendar_event_id, booking.status))
            .collect()
    };

    let mut summary = AutoCheckoutSummary {
        candidates: candidates.len(),
        checked_out: 0,
        closed: 0,
        skipped: 0,
        failed: 0,
        failures: Vec::new(),
        dry_run,
    };

    for (calendar_event_id, status) in candidates {
        let event = match status {
            BookingStatus::CheckedIn => BookingEvent::CheckOut {
                email: SYSTEM_ACTOR.to_string(),
            },
            BookingStatus::Approved => BookingEvent::AutoClose,
            _ => {
                summary.skipped += 1;
                continue;
            }
        };
        if dry_run {
            match status {
                BookingStatus::CheckedIn => summary.checked_out += 1,
                _ => summary.closed += 1,
            }
            continue;
        }
        match dispatch_event(deps, &calendar_event_id, &event).await {
            Ok(response) if response.changed => match status {
                BookingStatus::CheckedIn => summary.checked_out += 1,
                _ => summary.closed += 1,
            },
            Ok(_) => summary.skipped += 1,
            Err(err) => {
                summary.failed += 1;
                summary.failures.push(format!("{calendar_event_id}: {err}"));
                tracing::error!(
                    calendar_event_id = %calendar_event_id,
                    error = %err,
                    "auto-checkout candidate failed"
                );
            }
        }
    }

    tracing::info!(
        candidates = summary.candidates,
        checked_out = summary.checked_out,
        closed = summary.closed,
        skipped = summary.skipped,
        failed = summary.failed,
        dry_run = summary.dry_run,
        "auto-checkout sweep finished"
    );
    Ok(summary)
}

/// Validates a submission payload.
fn validate_submission(request: &SubmitBookingRequest) -> Result<(), ApiError> {
    if request.tenant.trim().is_empty() {
        return Err(ApiError::invalid(
            "tenant",
            &DomainError::InvalidTenant(request.tenant.clone()),
        ));
    }
    validate_title(&request.title).map_err(|err| ApiError::invalid("title", &err))?;
    validate_email(&request.requester_email)
        .map_err(|err| ApiError::invalid("requester_email", &err))?;
    validate_interval(request.start_date, request.end_date)
        .map_err(|err| ApiError::invalid("start_date", &err))?;
    if request.selected_rooms.is_empty() {
        return Err(ApiError::invalid(
            "selected_rooms",
            &DomainError::NoRoomsSelected,
        ));
    }
    Ok(())
}

/// Emails the requester, logging instead of failing on mailer errors.
async fn send_notification(
    deps: &BookingDeps,
    booking: &Booking,
    status: BookingStatus,
    header: &str,
) {
    let email = BookingEmail {
        calendar_event_id: booking.calendar_event_id.clone(),
        target_email: booking.requester_email.clone(),
        header_message: header.to_string(),
        status,
        tenant: booking.tenant.clone(),
    };
    if let Err(err) = deps.email.send_booking_email(&email).await {
        tracing::error!(
            booking_id = booking.booking_id,
            tenant = booking.tenant.id(),
            error = %err,
            "booking notification email failed"
        );
    }
}
