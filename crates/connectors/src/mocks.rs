// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test doubles for the outbound connectors.
//!
//! Recording doubles capture every call for assertion; failing doubles
//! return errors unconditionally so best-effort handling can be exercised.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::calendar::{CalendarEventFields, CalendarService};
use crate::email::{BookingEmail, EmailService};
use crate::error::ConnectorError;

/// One recorded calendar call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCall {
    Create {
        calendar_id: String,
        title: String,
    },
    Patch {
        calendar_id: String,
        event_id: String,
        title: String,
    },
    Delete {
        calendar_id: String,
        event_id: String,
    },
}

/// A calendar double that records calls and mints sequential event ids.
#[derive(Debug, Default)]
pub struct RecordingCalendarService {
    calls: Mutex<Vec<CalendarCall>>,
    next_id: AtomicU64,
}

impl RecordingCalendarService {
    /// Creates a new recording calendar double.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded call, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn calls(&self) -> Vec<CalendarCall> {
        self.calls.lock().expect("calendar mock lock").clone()
    }

    #[allow(clippy::expect_used)]
    fn record(&self, call: CalendarCall) {
        self.calls.lock().expect("calendar mock lock").push(call);
    }
}

#[async_trait]
impl CalendarService for RecordingCalendarService {
    async fn create_event(
        &self,
        calendar_id: &str,
        fields: &CalendarEventFields,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _attendee_calendar_ids: &[String],
    ) -> Result<String, ConnectorError> {
        self.record(CalendarCall::Create {
            calendar_id: calendar_id.to_string(),
            title: fields.title.clone(),
        });
        let id: u64 = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("mock-evt-{id}"))
    }

    async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        fields: &CalendarEventFields,
    ) -> Result<(), ConnectorError> {
        self.record(CalendarCall::Patch {
            calendar_id: calendar_id.to_string(),
            event_id: event_id.to_string(),
            title: fields.title.clone(),
        });
        Ok(())
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), ConnectorError> {
        self.record(CalendarCall::Delete {
            calendar_id: calendar_id.to_string(),
            event_id: event_id.to_string(),
        });
        Ok(())
    }
}

/// A calendar double that fails every call.
#[derive(Debug, Clone, Default)]
pub struct FailingCalendarService;

#[async_trait]
impl CalendarService for FailingCalendarService {
    async fn create_event(
        &self,
        _calendar_id: &str,
        _fields: &CalendarEventFields,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _attendee_calendar_ids: &[String],
    ) -> Result<String, ConnectorError> {
        Err(ConnectorError::Calendar(String::from(
            "calendar unavailable",
        )))
    }

    async fn patch_event(
        &self,
        _calendar_id: &str,
        _event_id: &str,
        _fields: &CalendarEventFields,
    ) -> Result<(), ConnectorError> {
        Err(ConnectorError::Calendar(String::from(
            "calendar unavailable",
        )))
    }

    async fn delete_event(
        &self,
        _calendar_id: &str,
        _event_id: &str,
    ) -> Result<(), ConnectorError> {
        Err(ConnectorError::Calendar(String::from(
            "calendar unavailable",
        )))
    }
}

/// An email double that records every message.
#[derive(Debug, Default)]
pub struct RecordingEmailService {
    sent: Mutex<Vec<BookingEmail>>,
}

impl RecordingEmailService {
    /// Creates a new recording email double.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded message, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn sent(&self) -> Vec<BookingEmail> {
        self.sent.lock().expect("email mock lock").clone()
    }
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send_booking_email(&self, email: &BookingEmail) -> Result<(), ConnectorError> {
        #[allow(clippy::expect_used)]
        self.sent.lock().expect("email mock lock").push(email.clone());
        Ok(())
    }
}

/// An email double that fails every send.
#[derive(Debug, Clone, Default)]
pub struct FailingEmailService;

#[async_trait]
impl EmailService for FailingEmailService {
    async fn send_booking_email(&self, _email: &BookingEmail) -> Result<(), ConnectorError> {
        Err(ConnectorError::Email(String::from("mailer unavailable")))
    }
}
