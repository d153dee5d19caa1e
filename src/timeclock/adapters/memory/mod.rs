//! In-memory adapters for tests and embedded deployments.

mod activity_log;
mod directory;
mod task;

pub use activity_log::InMemoryActivityLog;
pub use directory::InMemoryWorkerDirectory;
pub use task::InMemoryTaskRepository;
