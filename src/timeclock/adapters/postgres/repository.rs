//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow, TaskRowChanges},
    schema::tasks,
};
use crate::timeclock::{
    domain::{
        OperationName, OrderRef, PersistedTaskData, Task, TaskFilter, TaskId, TaskStatus, WorkerId,
    },
    ports::{TaskRepository, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by timeclock adapters.
pub type TimeclockPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// The revision check and the write are one `UPDATE ... WHERE revision`
/// statement, so the optimistic-concurrency contract holds without any
/// cross-process locks.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TimeclockPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TimeclockPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::unavailable)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTask(task_id)
                    }
                    _ => TaskStoreError::unavailable(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let submitted = task.revision();
        let submitted_row = i64::try_from(submitted).map_err(TaskStoreError::unavailable)?;
        // The write only lands when the stored row is exactly one
        // revision behind the submitted task.
        let expected_stored = submitted_row
            .checked_sub(1)
            .ok_or_else(|| TaskStoreError::RevisionConflict {
                task_id,
                submitted,
                stored: 0,
            })?;
        let changes = to_changes(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::revision.eq(expected_stored)),
            )
            .set(&changes)
            .execute(connection)
            .map_err(TaskStoreError::unavailable)?;

            if affected > 0 {
                return Ok(());
            }

            let stored = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .select(tasks::revision)
                .first::<i64>(connection)
                .optional()
                .map_err(TaskStoreError::unavailable)?;

            match stored {
                None => Err(TaskStoreError::NotFound(task_id)),
                Some(revision) => Err(TaskStoreError::RevisionConflict {
                    task_id,
                    submitted,
                    stored: u64::try_from(revision).unwrap_or(0),
                }),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::unavailable)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table.into_boxed();
            if let Some(worker_id) = filter.worker_id() {
                query = query.filter(tasks::worker_id.eq(worker_id.into_inner()));
            }
            if let Some(order_ref) = filter.order_ref() {
                query = query.filter(tasks::order_ref.eq(order_ref.as_str().to_owned()));
            }
            if let Some(operation) = filter.operation() {
                query = query.filter(tasks::operation.eq(operation.as_str().to_owned()));
            }
            if let Some(status) = filter.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(from) = filter.created_from_bound() {
                query = query.filter(tasks::created_at.ge(from));
            }
            if let Some(until) = filter.created_until_bound() {
                query = query.filter(tasks::created_at.le(until));
            }

            let rows = query
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::unavailable)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskStoreResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        worker_id: task.worker_id().into_inner(),
        order_ref: task.order_ref().as_str().to_owned(),
        operation: task.operation().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        hourly_rate: task.hourly_rate(),
        active_seconds: i64::try_from(task.active_seconds()).map_err(TaskStoreError::unavailable)?,
        start_time: task.start_time(),
        last_action_time: task.last_action_time(),
        end_time: task.end_time(),
        reason: task.reason().map(str::to_owned),
        manual: task.is_manual(),
        revision: i64::try_from(task.revision()).map_err(TaskStoreError::unavailable)?,
        created_at: task.created_at(),
    })
}

fn to_changes(task: &Task) -> TaskStoreResult<TaskRowChanges> {
    Ok(TaskRowChanges {
        status: task.status().as_str().to_owned(),
        active_seconds: i64::try_from(task.active_seconds()).map_err(TaskStoreError::unavailable)?,
        start_time: task.start_time(),
        last_action_time: task.last_action_time(),
        end_time: task.end_time(),
        reason: task.reason().map(str::to_owned),
        revision: i64::try_from(task.revision()).map_err(TaskStoreError::unavailable)?,
    })
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::unavailable)?;
    let order_ref = OrderRef::new(row.order_ref).map_err(TaskStoreError::unavailable)?;
    let operation = OperationName::new(row.operation).map_err(TaskStoreError::unavailable)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        worker_id: WorkerId::from_uuid(row.worker_id),
        order_ref,
        operation,
        status,
        hourly_rate: row.hourly_rate,
        active_seconds: u64::try_from(row.active_seconds).map_err(TaskStoreError::unavailable)?,
        start_time: row.start_time,
        last_action_time: row.last_action_time,
        end_time: row.end_time,
        reason: row.reason,
        manual: row.manual,
        revision: u64::try_from(row.revision).map_err(TaskStoreError::unavailable)?,
        created_at: row.created_at,
    }))
}
