//! Display ordering for the to-do board.
//!
//! Ordering works on immutable snapshots: every reorder returns a new
//! [`TodoList`] and leaves the caller's copy untouched. Manual positions only
//! reach the store through [`TodoList::manual_order`], which the caller
//! persists when the user saves.

use super::{DueDate, OrderIndex, ParseSortModeError, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;

/// Sort mode selected for the to-do board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    /// User-defined order by [`OrderIndex`].
    #[default]
    Manual,
    /// Status rank, then earliest due date first.
    DueDateAsc,
    /// Status rank, then latest due date first.
    DueDateDesc,
    /// Status rank, then earliest due date first.
    Priority,
}

impl SortMode {
    /// Every sort mode, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Manual,
        Self::DueDateAsc,
        Self::DueDateDesc,
        Self::Priority,
    ];

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::DueDateAsc => "Due Date Asc",
            Self::DueDateDesc => "Due Date Desc",
            Self::Priority => "Priority",
        }
    }

    /// Returns whether user reordering applies in this mode.
    #[must_use]
    pub const fn is_manual(self) -> bool {
        matches!(self, Self::Manual)
    }

    /// Compares two tasks for this mode.
    ///
    /// Every mode falls back to [`TaskId`] so the order is total.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        let primary = match self {
            Self::Manual => a.order_index().cmp(&b.order_index()),
            Self::DueDateAsc | Self::Priority => status_rank(a)
                .cmp(&status_rank(b))
                .then_with(|| due_ascending(a.due_date()).cmp(&due_ascending(b.due_date()))),
            Self::DueDateDesc => status_rank(a)
                .cmp(&status_rank(b))
                .then_with(|| due_descending(a.due_date()).cmp(&due_descending(b.due_date()))),
        };
        primary.then_with(|| a.id().cmp(&b.id()))
    }
}

impl TryFrom<&str> for SortMode {
    type Error = ParseSortModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "manual" => Ok(Self::Manual),
            "duedateasc" => Ok(Self::DueDateAsc),
            "duedatedesc" => Ok(Self::DueDateDesc),
            "priority" => Ok(Self::Priority),
            _ => Err(ParseSortModeError(value.to_owned())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn status_rank(task: &Task) -> u8 {
    task.status().rank()
}

// Undated tasks sort last in both directions.
fn due_ascending(due_date: Option<DueDate>) -> (bool, Option<DueDate>) {
    (due_date.is_none(), due_date)
}

fn due_descending(due_date: Option<DueDate>) -> (bool, Option<Reverse<DueDate>>) {
    (due_date.is_none(), due_date.map(Reverse))
}

/// Returns `tasks` ordered for `mode` without modifying the input.
#[must_use]
pub fn sort_tasks(tasks: &[Task], mode: SortMode) -> Vec<Task> {
    let mut ordered = tasks.to_vec();
    ordered.sort_by(|a, b| mode.compare(a, b));
    ordered
}

/// Direction of a single manual reorder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    /// Towards the start of the list.
    Up,
    /// Towards the end of the list.
    Down,
}

/// Persistable manual positions, one-based, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOrder(Vec<(TaskId, OrderIndex)>);

impl ManualOrder {
    /// Returns the `(task, order index)` pairs in display order.
    #[must_use]
    pub fn entries(&self) -> &[(TaskId, OrderIndex)] {
        &self.0
    }

    /// Returns the number of positioned tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there is nothing to persist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the assigned order index for a task.
    #[must_use]
    pub fn index_of(&self, task_id: TaskId) -> Option<OrderIndex> {
        self.0
            .iter()
            .find(|(id, _)| *id == task_id)
            .map(|(_, index)| *index)
    }
}

impl IntoIterator for ManualOrder {
    type Item = (TaskId, OrderIndex);
    type IntoIter = std::vec::IntoIter<(TaskId, OrderIndex)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Snapshot of the to-do board: tasks in display order under a sort mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    mode: SortMode,
    tasks: Vec<Task>,
}

impl TodoList {
    /// Sorts `tasks` for `mode` into a new snapshot.
    #[must_use]
    pub fn sorted(tasks: &[Task], mode: SortMode) -> Self {
        Self {
            mode,
            tasks: sort_tasks(tasks, mode),
        }
    }

    /// Returns the active sort mode.
    #[must_use]
    pub const fn mode(&self) -> SortMode {
        self.mode
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task identifiers in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(Task::id).collect()
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the display position of a task.
    #[must_use]
    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    /// Swaps a task with its predecessor.
    ///
    /// Returns an unchanged snapshot for the first task, for unknown ids, and
    /// outside manual mode.
    #[must_use]
    pub fn move_up(&self, task_id: TaskId) -> Self {
        self.reorder(task_id, MoveDirection::Up)
    }

    /// Swaps a task with its successor.
    ///
    /// Returns an unchanged snapshot for the last task, for unknown ids, and
    /// outside manual mode.
    #[must_use]
    pub fn move_down(&self, task_id: TaskId) -> Self {
        self.reorder(task_id, MoveDirection::Down)
    }

    /// Moves a task one step in `direction`.
    #[must_use]
    pub fn reorder(&self, task_id: TaskId, direction: MoveDirection) -> Self {
        let mut next = self.clone();
        if !self.mode.is_manual() {
            return next;
        }
        let Some(position) = self.position_of(task_id) else {
            return next;
        };
        let neighbour = match direction {
            MoveDirection::Up => position.checked_sub(1),
            MoveDirection::Down => position
                .checked_add(1)
                .filter(|candidate| *candidate < self.tasks.len()),
        };
        if let Some(other) = neighbour {
            next.tasks.swap(position, other);
        }
        next
    }

    /// Assigns one-based order indices matching the current sequence.
    #[must_use]
    pub fn manual_order(&self) -> ManualOrder {
        ManualOrder(
            (1_i64..)
                .zip(&self.tasks)
                .map(|(position, task)| (task.id(), OrderIndex::new(position)))
                .collect(),
        )
    }

    /// Returns a snapshot whose tasks carry the given manual order.
    ///
    /// Tasks absent from `order` keep their existing index.
    #[must_use]
    pub fn with_manual_order(&self, order: &ManualOrder) -> Self {
        let mut next = self.clone();
        for task in &mut next.tasks {
            if let Some(index) = order.index_of(task.id()) {
                task.set_order_index(index);
            }
        }
        next
    }

    /// Returns a snapshot with one task's status replaced.
    ///
    /// Manual mode keeps the current, possibly unsaved, sequence; every other
    /// mode re-sorts because status is part of its key.
    #[must_use]
    pub fn with_status(&self, task_id: TaskId, status: TaskStatus) -> Self {
        let mut next = self.clone();
        if let Some(task) = next.tasks.iter_mut().find(|task| task.id() == task_id) {
            task.set_explicit_status(status);
        }
        let mode = next.mode;
        if !mode.is_manual() {
            next.tasks.sort_by(|a, b| mode.compare(a, b));
        }
        next
    }
}
