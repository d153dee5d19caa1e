//! Diesel schema for timeclock persistence.

diesel::table! {
    /// Tracked task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Assigned worker.
        worker_id -> Uuid,
        /// Manufacturing-order reference.
        #[max_length = 64]
        order_ref -> Varchar,
        /// Operation name.
        #[max_length = 255]
        operation -> Varchar,
        /// Timer status.
        #[max_length = 50]
        status -> Varchar,
        /// Hourly-rate snapshot.
        hourly_rate -> Numeric,
        /// Active-seconds accumulator.
        active_seconds -> Int8,
        /// First-start timestamp.
        start_time -> Nullable<Timestamptz>,
        /// Accrual anchor.
        last_action_time -> Nullable<Timestamptz>,
        /// Completion timestamp.
        end_time -> Nullable<Timestamptz>,
        /// Latest pause reason.
        reason -> Nullable<Text>,
        /// Backfill flag.
        manual -> Bool,
        /// Optimistic-concurrency revision.
        revision -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Activity-trail records.
    activity_logs (id) {
        /// Record identifier.
        id -> Uuid,
        /// Worker the event is attributed to.
        worker_id -> Uuid,
        /// Event type.
        #[max_length = 50]
        event_type -> Varchar,
        /// Human-readable description.
        description -> Text,
        /// Optional detail, typically the pause reason.
        details -> Nullable<Text>,
        /// Related task, when any.
        task_id -> Nullable<Uuid>,
        /// Event timestamp.
        recorded_at -> Timestamptz,
    }
}
