// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An organizational namespace (e.g., a department) with its own rooms,
/// policies, and booking collection.
///
/// Tenant is always an explicit parameter; there is no implicit global
/// tenant anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tenant(String);

impl Tenant {
    /// Creates a new tenant identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Returns the tenant identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tenant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical room that can be reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// The room's numeric identifier.
    pub room_id: i64,
    /// The room's display name.
    pub name: String,
    /// The calendar the room's events are written to.
    pub calendar_id: String,
    /// Whether a booking for this room skips manual liaison approval.
    pub should_auto_approve: bool,
}

impl Room {
    /// Creates a new room.
    #[must_use]
    pub fn new(room_id: i64, name: &str, calendar_id: &str, should_auto_approve: bool) -> Self {
        Self {
            room_id,
            name: name.to_string(),
            calendar_id: calendar_id.to_string(),
            should_auto_approve,
        }
    }
}

/// An independently approvable add-on to a booking.
///
/// The set of categories is fixed; every service approval track, closeout
/// obligation, and service event is keyed by one of these.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Staff,
    Equipment,
    Catering,
    Cleaning,
    Security,
    Setup,
}

impl ServiceCategory {
    /// Every service category, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Staff,
        Self::Equipment,
        Self::Catering,
        Self::Cleaning,
        Self::Security,
        Self::Setup,
    ];

    /// Returns the wire representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Equipment => "equipment",
            Self::Catering => "catering",
            Self::Cleaning => "cleaning",
            Self::Security => "security",
            Self::Setup => "setup",
        }
    }

    /// Returns the human-facing label used in history notes.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Equipment => "Equipment",
            Self::Catering => "Catering",
            Self::Cleaning => "Cleaning",
            Self::Security => "Security",
            Self::Setup => "Setup",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "staff" => Ok(Self::Staff),
            "equipment" => Ok(Self::Equipment),
            "catering" => Ok(Self::Catering),
            "cleaning" => Ok(Self::Cleaning),
            "security" => Ok(Self::Security),
            "setup" => Ok(Self::Setup),
            _ => Err(DomainError::InvalidServiceCategory(s.to_string())),
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The action requested against a single service approval track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAction {
    Approve,
    Decline,
    Closeout,
}

impl ServiceAction {
    /// Returns the wire representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
            Self::Closeout => "closeout",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "approve" => Ok(Self::Approve),
            "decline" => Ok(Self::Decline),
            "closeout" => Ok(Self::Closeout),
            _ => Err(DomainError::InvalidServiceAction(s.to_string())),
        }
    }
}

impl FromStr for ServiceAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
