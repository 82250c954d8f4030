// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised by the outbound connectors.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The calendar service rejected a request or could not be reached.
    #[error("Calendar error: {0}")]
    Calendar(String),

    /// The mailer rejected a message or could not be reached.
    #[error("Email error: {0}")]
    Email(String),

    /// An address could not be parsed into a mailbox.
    #[error("Invalid address {address:?}: {message}")]
    InvalidAddress { address: String, message: String },
}
