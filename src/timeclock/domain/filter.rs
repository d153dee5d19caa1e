//! Filter predicate shared by the task store and the cost aggregator.

use super::{OperationName, OrderRef, Task, TaskStatus, WorkerId};
use chrono::{DateTime, Utc};

/// Conjunctive filter over persisted task records.
///
/// Unset fields match everything; the date range applies to the task's
/// creation timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    worker_id: Option<WorkerId>,
    order_ref: Option<OrderRef>,
    operation: Option<OperationName>,
    status: Option<TaskStatus>,
    created_from: Option<DateTime<Utc>>,
    created_until: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            worker_id: None,
            order_ref: None,
            operation: None,
            status: None,
            created_from: None,
            created_until: None,
        }
    }

    /// Creates a filter matching one worker's tasks.
    #[must_use]
    pub const fn for_worker(worker_id: WorkerId) -> Self {
        let mut filter = Self::any();
        filter.worker_id = Some(worker_id);
        filter
    }

    /// Restricts the filter to one worker.
    #[must_use]
    pub const fn with_worker(mut self, worker_id: WorkerId) -> Self {
        self.worker_id = Some(worker_id);
        self
    }

    /// Restricts the filter to one manufacturing order.
    #[must_use]
    pub fn with_order(mut self, order_ref: OrderRef) -> Self {
        self.order_ref = Some(order_ref);
        self
    }

    /// Restricts the filter to one operation.
    #[must_use]
    pub fn with_operation(mut self, operation: OperationName) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Restricts the filter to one timer status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to tasks created at or after `from`.
    #[must_use]
    pub const fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    /// Restricts the filter to tasks created at or before `until`.
    #[must_use]
    pub const fn created_until(mut self, until: DateTime<Utc>) -> Self {
        self.created_until = Some(until);
        self
    }

    /// Returns the worker restriction, if any.
    #[must_use]
    pub const fn worker_id(&self) -> Option<WorkerId> {
        self.worker_id
    }

    /// Returns the order restriction, if any.
    #[must_use]
    pub const fn order_ref(&self) -> Option<&OrderRef> {
        self.order_ref.as_ref()
    }

    /// Returns the operation restriction, if any.
    #[must_use]
    pub const fn operation(&self) -> Option<&OperationName> {
        self.operation.as_ref()
    }

    /// Returns the status restriction, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the lower creation-time bound, if any.
    #[must_use]
    pub const fn created_from_bound(&self) -> Option<DateTime<Utc>> {
        self.created_from
    }

    /// Returns the upper creation-time bound, if any.
    #[must_use]
    pub const fn created_until_bound(&self) -> Option<DateTime<Utc>> {
        self.created_until
    }

    /// Returns whether the task satisfies every set restriction.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.worker_id.is_some_and(|id| id != task.worker_id()) {
            return false;
        }
        if self
            .order_ref
            .as_ref()
            .is_some_and(|order| order != task.order_ref())
        {
            return false;
        }
        if self
            .operation
            .as_ref()
            .is_some_and(|operation| operation != task.operation())
        {
            return false;
        }
        if self.status.is_some_and(|status| status != task.status()) {
            return false;
        }
        if self.created_from.is_some_and(|from| task.created_at() < from) {
            return false;
        }
        if self
            .created_until
            .is_some_and(|until| task.created_at() > until)
        {
            return false;
        }
        true
    }
}
