//! `PostgreSQL` activity-trail sink.

use super::{models::NewActivityLogRow, repository::TimeclockPgPool, schema::activity_logs};
use crate::timeclock::{
    domain::ActivityRecord,
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

/// `PostgreSQL`-backed activity trail.
#[derive(Debug, Clone)]
pub struct PostgresActivityLog {
    pool: TimeclockPgPool,
}

impl PostgresActivityLog {
    /// Creates a new sink from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TimeclockPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityLogError::sink)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityLogError::sink)?
    }
}

#[async_trait]
impl ActivityLog for PostgresActivityLog {
    async fn record(&self, entry: &ActivityRecord) -> ActivityLogResult<()> {
        let new_row = NewActivityLogRow {
            id: Uuid::new_v4(),
            worker_id: entry.worker_id.into_inner(),
            event_type: entry.event.as_str().to_owned(),
            description: entry.description.clone(),
            details: entry.details.clone(),
            task_id: entry.task_id.map(crate::timeclock::domain::TaskId::into_inner),
            recorded_at: entry.recorded_at,
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(activity_logs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ActivityLogError::sink)?;
            Ok(())
        })
        .await
    }
}
