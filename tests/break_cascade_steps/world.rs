//! Shared world state for break cascade BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use rstest::fixture;
use taylor::timeclock::{
    adapters::memory::{InMemoryActivityLog, InMemoryTaskRepository, InMemoryWorkerDirectory},
    domain::{Task, TaskId, WorkerId},
    ports::TaskRepository,
    services::{BreakCascadeService, TaskTimerService},
};

use crate::test_helpers::ManualClock;

/// Timer service type used by the BDD world.
pub type TestTimerService = TaskTimerService<
    InMemoryTaskRepository,
    InMemoryActivityLog,
    InMemoryWorkerDirectory,
    ManualClock,
>;

/// Cascade service type used by the BDD world.
pub type TestCascadeService = BreakCascadeService<
    InMemoryTaskRepository,
    InMemoryActivityLog,
    InMemoryWorkerDirectory,
    ManualClock,
>;

/// Scenario world for break cascade behaviour tests.
pub struct CascadeWorld {
    pub timer: TestTimerService,
    pub cascade: TestCascadeService,
    pub repository: Arc<InMemoryTaskRepository>,
    pub directory: Arc<InMemoryWorkerDirectory>,
    pub clock: Arc<ManualClock>,
    pub workers: HashMap<String, WorkerId>,
    pub tasks: HashMap<String, TaskId>,
}

impl CascadeWorld {
    /// Creates a world with fresh in-memory ports and a frozen clock.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let activity_log = Arc::new(InMemoryActivityLog::new());
        let directory = Arc::new(InMemoryWorkerDirectory::new());
        let clock = Arc::new(ManualClock::at_shift_start());

        let timer = TaskTimerService::new(
            Arc::clone(&repository),
            Arc::clone(&activity_log),
            Arc::clone(&directory),
            Arc::clone(&clock),
        );
        let cascade = BreakCascadeService::new(
            Arc::clone(&repository),
            activity_log,
            Arc::clone(&directory),
            Arc::clone(&clock),
        );

        Self {
            timer,
            cascade,
            repository,
            directory,
            clock,
            workers: HashMap::new(),
            tasks: HashMap::new(),
        }
    }

    /// Looks up a worker registered by a Given step.
    pub fn worker(&self, name: &str) -> Result<WorkerId, eyre::Report> {
        self.workers
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown worker in scenario: {name}"))
    }

    /// Fetches the stored task registered under an operation name.
    pub fn stored_task(&self, operation: &str) -> Result<Task, eyre::Report> {
        let task_id = self
            .tasks
            .get(operation)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task in scenario: {operation}"))?;
        run_async(self.repository.find_by_id(task_id))?
            .ok_or_else(|| eyre::eyre!("task not stored: {operation}"))
    }
}

impl Default for CascadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CascadeWorld {
    CascadeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
