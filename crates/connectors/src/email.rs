// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The email collaborator.
//!
//! Notification emails are fire-and-forget from the lifecycle's
//! perspective. The body is a short header message plus the booking's
//! status; rendering beyond that is out of scope.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use room_book_domain::{BookingStatus, Tenant};
use tracing::info;

use crate::error::ConnectorError;

/// One booking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingEmail {
    /// The booking's calendar event id, included for reference links.
    pub calendar_event_id: String,
    /// The recipient.
    pub target_email: String,
    /// The transition-specific header line.
    pub header_message: String,
    /// The booking's status after the transition.
    pub status: BookingStatus,
    /// The tenant the booking belongs to.
    pub tenant: Tenant,
}

/// The email service consumed by the side-effect executor.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends one booking notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or delivered.
    async fn send_booking_email(&self, email: &BookingEmail) -> Result<(), ConnectorError>;
}

/// An SMTP mailer built on Lettre.
#[derive(Clone)]
pub struct SmtpEmailService {
    smtp_server: String,
    smtp_port: u16,
    credentials: Credentials,
    from_address: String,
}

impl SmtpEmailService {
    /// Creates a new SMTP mailer.
    #[must_use]
    pub fn new(
        smtp_server: &str,
        smtp_port: u16,
        smtp_username: &str,
        smtp_password: &str,
        from_address: &str,
    ) -> Self {
        Self {
            smtp_server: smtp_server.to_string(),
            smtp_port,
            credentials: Credentials::new(smtp_username.to_string(), smtp_password.to_string()),
            from_address: from_address.to_string(),
        }
    }

    /// Builds a fresh transport per message to avoid connection pooling
    /// issues.
    fn build_transport(&self) -> Result<SmtpTransport, ConnectorError> {
        Ok(SmtpTransport::relay(&self.smtp_server)
            .map_err(|e| ConnectorError::Email(format!("SMTP relay error: {e}")))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build())
    }
}

fn render_body(email: &BookingEmail) -> String {
    format!(
        "{}\n\nBooking status: {}\nReference: {}\n",
        email.header_message,
        email.status.as_str(),
        email.calendar_event_id
    )
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send_booking_email(&self, email: &BookingEmail) -> Result<(), ConnectorError> {
        let message: Message = Message::builder()
            .from(self.from_address.parse().map_err(|e| {
                ConnectorError::InvalidAddress {
                    address: self.from_address.clone(),
                    message: format!("{e}"),
                }
            })?)
            .to(email.target_email.parse().map_err(|e| {
                ConnectorError::InvalidAddress {
                    address: email.target_email.clone(),
                    message: format!("{e}"),
                }
            })?)
            .subject(format!(
                "[{}] Booking update: {}",
                email.tenant,
                email.status.as_str()
            ))
            .header(ContentType::TEXT_PLAIN)
            .body(render_body(email))
            .map_err(|e| ConnectorError::Email(format!("Failed to build email: {e}")))?;

        let mailer: SmtpTransport = self.build_transport()?;
        tokio::task::spawn_blocking(move || {
            mailer
                .send(&message)
                .map_err(|e| ConnectorError::Email(format!("Failed to send email: {e}")))
        })
        .await
        .map_err(|e| ConnectorError::Email(format!("Email task failed: {e}")))?
        .map(|_| ())
    }
}

/// A mailer that logs instead of sending. Used in development.
#[derive(Clone, Debug, Default)]
pub struct ConsoleEmailService;

impl ConsoleEmailService {
    /// Creates a new console mailer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send_booking_email(&self, email: &BookingEmail) -> Result<(), ConnectorError> {
        info!(
            to = %email.target_email,
            status = %email.status,
            tenant = %email.tenant,
            calendar_event_id = %email.calendar_event_id,
            "Booking email (console mode): {}",
            email.header_message
        );
        Ok(())
    }
}
