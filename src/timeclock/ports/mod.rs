//! Port contracts for the timeclock module.

pub mod activity_log;
pub mod directory;
pub mod repository;

pub use activity_log::{ActivityLog, ActivityLogError, ActivityLogResult};
pub use directory::{WorkerDirectory, WorkerDirectoryError, WorkerDirectoryResult};
pub use repository::{TaskRepository, TaskStoreError, TaskStoreResult};
