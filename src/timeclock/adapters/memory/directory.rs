//! In-memory worker directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::timeclock::{
    domain::{Availability, WorkerId, WorkerSnapshot},
    ports::{WorkerDirectory, WorkerDirectoryError, WorkerDirectoryResult},
};

/// In-memory worker roster with mutation helpers for embedding callers
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkerDirectory {
    workers: Arc<RwLock<HashMap<WorkerId, WorkerSnapshot>>>,
}

fn lock_poisoned(err: impl std::fmt::Display) -> WorkerDirectoryError {
    WorkerDirectoryError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryWorkerDirectory {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a worker record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerDirectoryError::Unavailable`] when the backing
    /// lock is poisoned.
    pub fn insert(&self, id: WorkerId, worker: WorkerSnapshot) -> WorkerDirectoryResult<()> {
        let mut workers = self.workers.write().map_err(lock_poisoned)?;
        workers.insert(id, worker);
        Ok(())
    }

    /// Flips a worker's availability flag.
    ///
    /// Unknown workers are ignored; the roster is owned externally and
    /// this helper only mirrors its state.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerDirectoryError::Unavailable`] when the backing
    /// lock is poisoned.
    pub fn set_availability(
        &self,
        id: WorkerId,
        availability: Availability,
    ) -> WorkerDirectoryResult<()> {
        let mut workers = self.workers.write().map_err(lock_poisoned)?;
        if let Some(worker) = workers.get_mut(&id) {
            worker.availability = availability;
        }
        Ok(())
    }
}

#[async_trait]
impl WorkerDirectory for InMemoryWorkerDirectory {
    async fn find_by_id(&self, id: WorkerId) -> WorkerDirectoryResult<Option<WorkerSnapshot>> {
        let workers = self.workers.read().map_err(lock_poisoned)?;
        Ok(workers.get(&id).cloned())
    }
}
