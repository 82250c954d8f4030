// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The calendar collaborator.
//!
//! Every booking owns one calendar event; the event id is the booking's
//! external key. Event titles carry the status label so the calendar acts
//! as a read-only mirror of booking state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use room_book_domain::BookingStatus;
use serde::Serialize;
use tracing::debug;

use crate::error::ConnectorError;

/// Maximum booking-title length inside a calendar event title. Longer
/// titles are cut and marked with an ellipsis.
const MAX_EMBEDDED_TITLE_LENGTH: usize = 60;

/// Upper bound on any single calendar request. A transition must never
/// wait on the calendar longer than this.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Formats a calendar event title from booking state.
///
/// The convention is `"[<STATUS_LABEL>] <roomIds> <title>"`, with room ids
/// comma-joined in selection order and the booking title truncated to
/// [`MAX_EMBEDDED_TITLE_LENGTH`] characters.
#[must_use]
pub fn format_event_title(status: BookingStatus, room_ids: &[i64], title: &str) -> String {
    let rooms: String = room_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(",");

    let embedded: String = if title.chars().count() > MAX_EMBEDDED_TITLE_LENGTH {
        let cut: String = title.chars().take(MAX_EMBEDDED_TITLE_LENGTH).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    };

    format!("[{}] {rooms} {embedded}", status.as_str())
}

/// The mutable fields of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEventFields {
    /// The event title, already formatted with the status prefix.
    pub title: String,
    /// Free-form description shown on the event.
    pub description: String,
}

/// The calendar service consumed by the side-effect executor.
///
/// Creation is fatal for a submission (a booking has no identity without
/// its event); patches and deletes are best-effort mirrors of committed
/// state.
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Creates an event and returns the id assigned by the calendar.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar rejects the event or cannot be
    /// reached.
    async fn create_event(
        &self,
        calendar_id: &str,
        fields: &CalendarEventFields,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        attendee_calendar_ids: &[String],
    ) -> Result<String, ConnectorError>;

    /// Patches the mutable fields of an existing event.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar rejects the patch or cannot be
    /// reached.
    async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        fields: &CalendarEventFields,
    ) -> Result<(), ConnectorError>;

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar rejects the delete or cannot be
    /// reached.
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), ConnectorError>;
}

#[derive(Debug, Serialize)]
struct CreateEventBody<'a> {
    title: &'a str,
    description: &'a str,
    start_time: String,
    end_time: String,
    attendee_calendar_ids: &'a [String],
}

#[derive(Debug, serde::Deserialize)]
struct CreateEventResponse {
    event_id: String,
}

/// A calendar service speaking plain REST.
///
/// Endpoints follow `{base_url}/calendars/{calendar_id}/events[/{event_id}]`
/// with JSON bodies.
pub struct RestCalendarService {
    client: reqwest::Client,
    base_url: String,
}

impl RestCalendarService {
    /// Creates a new REST calendar service against the given base URL.
    ///
    /// Every request carries a [`REQUEST_TIMEOUT`] deadline.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ConnectorError> {
        let client: reqwest::Client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!("{}/calendars/{calendar_id}/events", self.base_url)
    }
}

#[async_trait]
impl CalendarService for RestCalendarService {
    async fn create_event(
        &self,
        calendar_id: &str,
        fields: &CalendarEventFields,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        attendee_calendar_ids: &[String],
    ) -> Result<String, ConnectorError> {
        let body: CreateEventBody<'_> = CreateEventBody {
            title: &fields.title,
            description: &fields.description,
            start_time: start.to_rfc3339(),
            end_time: end.to_rfc3339(),
            attendee_calendar_ids,
        };

        let response = self
            .client
            .post(self.events_url(calendar_id))
            .json(&body)
            .send()
            .await
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?
            .error_for_status()
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?;

        let created: CreateEventResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?;

        debug!(
            "Created calendar event {} on calendar {}",
            created.event_id, calendar_id
        );
        Ok(created.event_id)
    }

    async fn patch_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        fields: &CalendarEventFields,
    ) -> Result<(), ConnectorError> {
        self.client
            .patch(format!("{}/{event_id}", self.events_url(calendar_id)))
            .json(fields)
            .send()
            .await
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?
            .error_for_status()
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?;
        Ok(())
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), ConnectorError> {
        self.client
            .delete(format!("{}/{event_id}", self.events_url(calendar_id)))
            .send()
            .await
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?
            .error_for_status()
            .map_err(|e| ConnectorError::Calendar(e.to_string()))?;
        Ok(())
    }
}
