//! Worker directory port.

use crate::timeclock::domain::{WorkerId, WorkerSnapshot};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for worker directory lookups.
pub type WorkerDirectoryResult<T> = Result<T, WorkerDirectoryError>;

/// Read-only view of the externally-owned worker roster.
#[async_trait]
pub trait WorkerDirectory: Send + Sync {
    /// Looks up a worker by identifier.
    ///
    /// Returns `None` when the worker does not exist.
    async fn find_by_id(&self, id: WorkerId) -> WorkerDirectoryResult<Option<WorkerSnapshot>>;
}

/// Errors returned by worker directory implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkerDirectoryError {
    /// The directory backend could not be reached.
    #[error("worker directory unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkerDirectoryError {
    /// Wraps a backend failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
