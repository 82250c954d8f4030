// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transition function.
//!
//! [`apply`] is total and synchronous: it matches the (state value, event)
//! pair, computes the new snapshot, and describes — never performs — the
//! side effects the transition requires. Pairs with no transition defined
//! return the snapshot unchanged with no side effects requested.

use crate::event::BookingEvent;
use crate::state::{Snapshot, StateValue};
use room_book_audit::{Actor, service_decline_note, service_note};
use room_book_domain::{
    BookingStatus, CloseoutProgress, DEFAULT_DECLINE_REASON, Rendezvous, ServiceAction,
    ServiceCategory, evaluate_rendezvous,
};

/// The milestone timestamp/actor pair a transition stamps on the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution {
    FirstApproved,
    FinalApproved,
    Declined,
    Canceled,
    CheckedIn,
    CheckedOut,
    NoShowed,
}

/// An externally meaningful state reached by a transition.
///
/// The side-effect executor uses the milestone to stamp the booking record,
/// patch the calendar event's visible status, and address the notification
/// email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// The status label the milestone records.
    pub status: BookingStatus,
    /// Who the milestone is attributed to.
    pub actor: Actor,
    /// Which timestamp/actor pair to stamp, if any.
    pub attribution: Option<Attribution>,
}

/// One history log entry requested by a transition.
///
/// A transition may request more than one: a service decline that causes an
/// overall decline requests the service entry and a separate,
/// system-attributed decline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryNote {
    /// The status the entry records.
    pub status: BookingStatus,
    /// Who the entry is attributed to.
    pub changed_by: String,
    /// Optional human-readable note.
    pub note: Option<String>,
}

/// The result of applying one event to one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The snapshot after the transition (unchanged for a no-op).
    pub snapshot: Snapshot,
    /// Whether the event produced any change at all.
    pub changed: bool,
    /// The externally meaningful state reached, if any. Intermediate
    /// service approvals change the snapshot without producing a milestone.
    pub milestone: Option<Milestone>,
    /// History log entries to append, in order.
    pub history: Vec<HistoryNote>,
}

impl Transition {
    fn no_op(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            changed: false,
            milestone: None,
            history: Vec::new(),
        }
    }
}

/// Applies an event to a snapshot.
///
/// The computation is pure: the caller persists the returned snapshot and
/// runs the requested side effects afterwards, so state decisions are never
/// contingent on I/O success.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn apply(snapshot: &Snapshot, event: &BookingEvent) -> Transition {
    match (snapshot.value, event) {
        (StateValue::Requested, BookingEvent::Approve { email }) => {
            first_approval(snapshot, email)
        }
        (
            StateValue::Requested | StateValue::PreApproved | StateValue::ServicesRequest,
            BookingEvent::Decline { email, reason },
        ) => decline(snapshot, email, reason.as_deref()),
        (
            StateValue::Requested
            | StateValue::PreApproved
            | StateValue::ServicesRequest
            | StateValue::Approved
            | StateValue::CheckedIn,
            BookingEvent::Cancel { email },
        ) => cancel(snapshot, email),
        (StateValue::PreApproved, BookingEvent::Approve { email }) => {
            final_approval(snapshot, email)
        }
        (StateValue::ServicesRequest, BookingEvent::ServiceApprove { category, email }) => {
            service_approve(snapshot, *category, email)
        }
        (
            StateValue::ServicesRequest,
            BookingEvent::ServiceDecline {
                category,
                email,
                reason,
            },
        ) => service_decline(snapshot, *category, email, reason.as_deref()),
        (StateValue::Approved, BookingEvent::CheckIn { email }) => {
            let mut next: Snapshot = snapshot.clone();
            next.value = StateValue::CheckedIn;
            milestone_transition(
                next,
                BookingStatus::CheckedIn,
                Actor::user(email),
                Some(Attribution::CheckedIn),
                None,
            )
        }
        (
            StateValue::Approved | StateValue::CheckedIn,
            BookingEvent::NoShow { email },
        ) => {
            let mut next: Snapshot = snapshot.clone();
            next.value = StateValue::Closed;
            milestone_transition(
                next,
                BookingStatus::NoShow,
                Actor::user(email),
                Some(Attribution::NoShowed),
                None,
            )
        }
        (StateValue::Approved, BookingEvent::AutoClose) => {
            let mut next: Snapshot = snapshot.clone();
            next.value = StateValue::Closed;
            milestone_transition(
                next,
                BookingStatus::Closed,
                Actor::system(),
                None,
                Some(String::from("Closed by scheduled auto-close")),
            )
        }
        (StateValue::CheckedIn, BookingEvent::CheckOut { email }) => {
            check_out(snapshot, email)
        }
        (StateValue::ServiceCloseout, BookingEvent::ServiceCloseout { category, email }) => {
            service_closeout(snapshot, *category, email)
        }
        _ => Transition::no_op(snapshot.clone()),
    }
}

fn milestone_transition(
    snapshot: Snapshot,
    status: BookingStatus,
    actor: Actor,
    attribution: Option<Attribution>,
    note: Option<String>,
) -> Transition {
    let changed_by: String = actor.email.clone();
    Transition {
        snapshot,
        changed: true,
        milestone: Some(Milestone {
            status,
            actor,
            attribution,
        }),
        history: vec![HistoryNote {
            status,
            changed_by,
            note,
        }],
    }
}

fn first_approval(snapshot: &Snapshot, email: &str) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    // A tenant that forces manual approval can land an auto-approve booking
    // in Requested; that first approve takes it straight to Approved.
    if next.context.all_rooms_auto_approve() && next.context.services.is_empty() {
        next.value = StateValue::Approved;
        return milestone_transition(
            next,
            BookingStatus::Approved,
            Actor::user(email),
            Some(Attribution::FinalApproved),
            None,
        );
    }
    next.value = StateValue::PreApproved;
    milestone_transition(
        next,
        BookingStatus::PreApproved,
        Actor::user(email),
        Some(Attribution::FirstApproved),
        None,
    )
}

fn final_approval(snapshot: &Snapshot, email: &str) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    if next.context.services.is_empty() {
        next.value = StateValue::Approved;
        return milestone_transition(
            next,
            BookingStatus::Approved,
            Actor::user(email),
            Some(Attribution::FinalApproved),
            None,
        );
    }
    next.value = StateValue::ServicesRequest;
    milestone_transition(
        next,
        BookingStatus::ServicesRequest,
        Actor::user(email),
        None,
        None,
    )
}

fn decline(snapshot: &Snapshot, email: &str, reason: Option<&str>) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    next.value = StateValue::Declined;
    let recorded: String = reason
        .map_or(DEFAULT_DECLINE_REASON, |r| r)
        .to_string();
    next.context.decline_reason = Some(recorded.clone());
    milestone_transition(
        next,
        BookingStatus::Declined,
        Actor::user(email),
        Some(Attribution::Declined),
        Some(recorded),
    )
}

fn cancel(snapshot: &Snapshot, email: &str) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    let outstanding = next.context.services.approved();
    if outstanding.is_empty() {
        next.value = StateValue::Closed;
    } else {
        next.context.closeout = CloseoutProgress::for_services(outstanding);
        next.value = StateValue::ServiceCloseout;
    }
    milestone_transition(
        next,
        BookingStatus::Canceled,
        Actor::user(email),
        Some(Attribution::Canceled),
        None,
    )
}

fn check_out(snapshot: &Snapshot, email: &str) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    let outstanding = next.context.services.approved();
    if outstanding.is_empty() {
        next.value = StateValue::Closed;
    } else {
        next.context.closeout = CloseoutProgress::for_services(outstanding);
        next.value = StateValue::ServiceCloseout;
    }
    milestone_transition(
        next,
        BookingStatus::CheckedOut,
        Actor::user(email),
        Some(Attribution::CheckedOut),
        None,
    )
}

fn service_approve(snapshot: &Snapshot, category: ServiceCategory, email: &str) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    if !next.context.services.approve(category) {
        // Unrequested category, or a track that was already decided.
        return Transition::no_op(snapshot.clone());
    }

    let track_note = HistoryNote {
        status: BookingStatus::ServicesRequest,
        changed_by: email.to_string(),
        note: Some(service_note(category, ServiceAction::Approve, None)),
    };

    match evaluate_rendezvous(&next.context.services) {
        Rendezvous::Pending => Transition {
            snapshot: next,
            changed: true,
            milestone: None,
            history: vec![track_note],
        },
        Rendezvous::AllApproved => {
            next.value = StateValue::Approved;
            Transition {
                snapshot: next,
                changed: true,
                milestone: Some(Milestone {
                    status: BookingStatus::Approved,
                    actor: Actor::user(email),
                    attribution: Some(Attribution::FinalApproved),
                }),
                history: vec![
                    track_note,
                    HistoryNote {
                        status: BookingStatus::Approved,
                        changed_by: email.to_string(),
                        note: None,
                    },
                ],
            }
        }
        // An approval cannot produce a declined track.
        Rendezvous::AnyDeclined(_) => Transition::no_op(snapshot.clone()),
    }
}

fn service_decline(
    snapshot: &Snapshot,
    category: ServiceCategory,
    email: &str,
    reason: Option<&str>,
) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    if !next.context.services.decline(category) {
        return Transition::no_op(snapshot.clone());
    }

    let recorded: String = reason
        .map_or(DEFAULT_DECLINE_REASON, |r| r)
        .to_string();
    next.context.decline_reason = Some(recorded.clone());
    next.value = StateValue::Declined;

    // The overall decline is attributed to the system, not to the approver
    // who declined the individual service; the service entry keeps the
    // approver's attribution.
    Transition {
        snapshot: next,
        changed: true,
        milestone: Some(Milestone {
            status: BookingStatus::Declined,
            actor: Actor::system(),
            attribution: Some(Attribution::Declined),
        }),
        history: vec![
            HistoryNote {
                status: BookingStatus::ServicesRequest,
                changed_by: email.to_string(),
                note: Some(service_note(category, ServiceAction::Decline, Some(&recorded))),
            },
            HistoryNote {
                status: BookingStatus::Declined,
                changed_by: Actor::system().email,
                note: Some(service_decline_note(category, &recorded)),
            },
        ],
    }
}

fn service_closeout(snapshot: &Snapshot, category: ServiceCategory, email: &str) -> Transition {
    let mut next: Snapshot = snapshot.clone();
    if !next.context.closeout.close_out(category) {
        return Transition::no_op(snapshot.clone());
    }

    let mut history: Vec<HistoryNote> = vec![HistoryNote {
        status: BookingStatus::ServiceCloseout,
        changed_by: email.to_string(),
        note: Some(service_note(category, ServiceAction::Closeout, None)),
    }];

    if next.context.closeout.is_complete() {
        next.value = StateValue::Closed;
        history.push(HistoryNote {
            status: BookingStatus::Closed,
            changed_by: email.to_string(),
            note: None,
        });
        return Transition {
            snapshot: next,
            changed: true,
            milestone: Some(Milestone {
                status: BookingStatus::Closed,
                actor: Actor::user(email),
                attribution: None,
            }),
            history,
        };
    }

    Transition {
        snapshot: next,
        changed: true,
        milestone: None,
        history,
    }
}
