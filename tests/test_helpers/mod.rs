//! Shared deterministic clock for integration tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock advanced explicitly by tests instead of by the wall.
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the start of a morning shift.
    #[must_use]
    pub fn at_shift_start() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 6, 2, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        Self {
            now: RwLock::new(start),
        }
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, seconds: i64) {
        let mut now = self.now.write().expect("clock lock");
        *now += Duration::seconds(seconds);
    }

    /// Moves the clock forward by whole minutes.
    pub fn advance_minutes(&self, minutes: i64) {
        self.advance_secs(minutes * 60);
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
