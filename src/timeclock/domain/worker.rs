//! Read-mostly worker projection consumed by the timer services.

use super::ParseAvailabilityError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Worker availability flag; the trigger for the break cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Worker is on the floor and may run timers.
    Available,
    /// Worker is on break; starting or resuming tasks is rejected.
    Break,
}

impl Availability {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Break => "break",
        }
    }

    /// Returns whether the worker is on break.
    #[must_use]
    pub const fn is_on_break(self) -> bool {
        matches!(self, Self::Break)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Availability {
    type Error = ParseAvailabilityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "available" => Ok(Self::Available),
            "break" => Ok(Self::Break),
            _ => Err(ParseAvailabilityError(value.to_owned())),
        }
    }
}

/// Snapshot of an externally-owned worker record.
///
/// The engine reads the current rate when a task is first assigned and
/// the availability flag before start/resume actions; it never writes
/// worker state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    /// Display name.
    pub name: String,
    /// Current hourly rate; snapshotted onto tasks at assignment time.
    pub hourly_rate: Decimal,
    /// Current availability.
    pub availability: Availability,
}

impl WorkerSnapshot {
    /// Creates a worker snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, hourly_rate: Decimal, availability: Availability) -> Self {
        Self {
            name: name.into(),
            hourly_rate,
            availability,
        }
    }
}
