//! Shared fixtures for timeclock tests.

use crate::timeclock::domain::{OperationName, OrderRef, Task, WorkerId};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use std::sync::RwLock;

/// Deterministic clock advanced explicitly by tests.
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, seconds: i64) {
        let mut now = self.now.write().expect("clock lock");
        *now += Duration::seconds(seconds);
    }

    /// Rewinds the clock; used to simulate clock skew.
    pub fn rewind_secs(&self, seconds: i64) {
        let mut now = self.now.write().expect("clock lock");
        *now -= Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock")
    }
}

/// A fixed shift-start instant shared across tests.
pub fn shift_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a pending task for the given worker at a whole-dollar rate.
pub fn pending_task(worker_id: WorkerId, rate_dollars: i64, clock: &impl Clock) -> Task {
    Task::new(
        worker_id,
        OrderRef::new("MO-2025-0042").expect("valid order ref"),
        OperationName::new("Packing").expect("valid operation"),
        Decimal::from(rate_dollars),
        clock,
    )
    .expect("valid task")
}
