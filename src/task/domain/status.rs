//! Status derivation rules shared by reconciliation and checkbox toggles.
//!
//! `Done` is never inferred from dates. Every other status is derived from
//! the due date relative to `today`, and only the reconciliation sweep and an
//! unchecked checkbox perform that derivation.

use super::{DueDate, Task, TaskId, TaskStatus};
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Returns the local calendar date reported by `clock`.
#[must_use]
pub fn today(clock: &impl Clock) -> NaiveDate {
    clock.local().date_naive()
}

/// Derives the open-work status for a due date.
///
/// Tasks without a due date are always `Pending`.
#[must_use]
pub fn open_status_for(due_date: Option<DueDate>, today: NaiveDate) -> TaskStatus {
    match due_date {
        Some(due) if due.is_before(today) => TaskStatus::Missed,
        _ => TaskStatus::Pending,
    }
}

/// A status change computed by the status rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusTransition {
    /// Task receiving the new status.
    pub task_id: TaskId,
    /// Status before the change.
    pub from: TaskStatus,
    /// Status after the change.
    pub to: TaskStatus,
}

/// Computes the `Missed` transitions for overdue open work.
///
/// A task is emitted when it is not `Done`, not already `Missed`, and has a
/// due date strictly before `today`. Applying the result and running the
/// sweep again yields no further transitions.
#[must_use]
pub fn reconcile_missed<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    today: NaiveDate,
) -> Vec<StatusTransition> {
    tasks
        .into_iter()
        .filter(|task| matches!(task.status(), TaskStatus::Pending))
        .filter(|task| task.due_date().is_some_and(|due| due.is_before(today)))
        .map(|task| StatusTransition {
            task_id: task.id(),
            from: task.status(),
            to: TaskStatus::Missed,
        })
        .collect()
}

/// Returns the status a task takes when its checkbox changes.
///
/// Checking always yields `Done`. Unchecking re-derives the status from the
/// due date, so the result never depends on the intermediate `Done` state.
#[must_use]
pub fn toggle_done(task: &Task, checked: bool, today: NaiveDate) -> TaskStatus {
    if checked {
        TaskStatus::Done
    } else {
        open_status_for(task.due_date(), today)
    }
}
