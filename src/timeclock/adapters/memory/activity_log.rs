//! Recording in-memory activity sink.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::timeclock::{
    domain::ActivityRecord,
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};

/// In-memory activity trail that retains every record for inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLog {
    entries: Arc<RwLock<Vec<ActivityRecord>>>,
}

impl InMemoryActivityLog {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded entry, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::Sink`] when the backing lock is
    /// poisoned.
    pub fn entries(&self) -> ActivityLogResult<Vec<ActivityRecord>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| ActivityLogError::sink(std::io::Error::other(err.to_string())))?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn record(&self, entry: &ActivityRecord) -> ActivityLogResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| ActivityLogError::sink(std::io::Error::other(err.to_string())))?;
        entries.push(entry.clone());
        Ok(())
    }
}
