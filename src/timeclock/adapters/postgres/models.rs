//! Diesel row models for timeclock persistence.

use super::schema::{activity_logs, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Assigned worker.
    pub worker_id: uuid::Uuid,
    /// Manufacturing-order reference.
    pub order_ref: String,
    /// Operation name.
    pub operation: String,
    /// Timer status.
    pub status: String,
    /// Hourly-rate snapshot.
    pub hourly_rate: Decimal,
    /// Active-seconds accumulator.
    pub active_seconds: i64,
    /// First-start timestamp.
    pub start_time: Option<DateTime<Utc>>,
    /// Accrual anchor.
    pub last_action_time: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub end_time: Option<DateTime<Utc>>,
    /// Latest pause reason.
    pub reason: Option<String>,
    /// Backfill flag.
    pub manual: bool,
    /// Optimistic-concurrency revision.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Assigned worker.
    pub worker_id: uuid::Uuid,
    /// Manufacturing-order reference.
    pub order_ref: String,
    /// Operation name.
    pub operation: String,
    /// Timer status.
    pub status: String,
    /// Hourly-rate snapshot.
    pub hourly_rate: Decimal,
    /// Active-seconds accumulator.
    pub active_seconds: i64,
    /// First-start timestamp.
    pub start_time: Option<DateTime<Utc>>,
    /// Accrual anchor.
    pub last_action_time: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub end_time: Option<DateTime<Utc>>,
    /// Latest pause reason.
    pub reason: Option<String>,
    /// Backfill flag.
    pub manual: bool,
    /// Optimistic-concurrency revision.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Update model carrying every transition-mutable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRowChanges {
    /// Timer status.
    pub status: String,
    /// Active-seconds accumulator.
    pub active_seconds: i64,
    /// First-start timestamp.
    pub start_time: Option<DateTime<Utc>>,
    /// Accrual anchor.
    pub last_action_time: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub end_time: Option<DateTime<Utc>>,
    /// Latest pause reason.
    pub reason: Option<String>,
    /// Optimistic-concurrency revision.
    pub revision: i64,
}

/// Insert model for activity-trail records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_logs)]
pub struct NewActivityLogRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Worker the event is attributed to.
    pub worker_id: uuid::Uuid,
    /// Event type.
    pub event_type: String,
    /// Human-readable description.
    pub description: String,
    /// Optional detail.
    pub details: Option<String>,
    /// Related task, when any.
    pub task_id: Option<uuid::Uuid>,
    /// Event timestamp.
    pub recorded_at: DateTime<Utc>,
}
