//! Activity-trail sink port.

use crate::timeclock::domain::ActivityRecord;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity log operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Best-effort audit sink.
///
/// The services treat writes as fire-and-forget: a failed record is
/// swallowed and never rolls back or blocks the state transition that
/// produced it.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Appends one record to the trail.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::Sink`] when the write fails.
    async fn record(&self, entry: &ActivityRecord) -> ActivityLogResult<()>;
}

/// Errors returned by activity log implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// The sink rejected or could not persist the record.
    #[error("activity log write failed: {0}")]
    Sink(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a sink failure.
    pub fn sink(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Sink(Arc::new(err))
    }
}
