//! Task aggregate root and related lifecycle types.

use super::{DueDate, OrderIndex, ParseTaskStatusError, TaskDomainError, TaskId, TaskTitle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Open work whose due date has not passed.
    Pending,
    /// Work the user has checked off.
    Done,
    /// Open work whose due date has passed.
    Missed,
}

impl TaskStatus {
    /// Every status, in rank order.
    pub const ALL: [Self; 3] = [Self::Missed, Self::Pending, Self::Done];

    /// Statuses that still represent open work.
    pub const OPEN: [Self; 2] = [Self::Pending, Self::Missed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Done => "Done",
            Self::Missed => "Missed",
        }
    }

    /// Returns the sort prefix used by every non-manual ordering.
    ///
    /// Overdue work ranks first and completed work last.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Missed => 0,
            Self::Pending => 1,
            Self::Done => 2,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            "missed" => Ok(Self::Missed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    due_date: Option<DueDate>,
    status: TaskStatus,
    order_index: OrderIndex,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if present and well-formed.
    pub due_date: Option<DueDate>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Resolved manual order index.
    pub order_index: OrderIndex,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            order_index: data.order_index,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the manual order index.
    #[must_use]
    pub const fn order_index(&self) -> OrderIndex {
        self.order_index
    }

    /// Overwrites the status with the user's explicit choice.
    ///
    /// The due date is not consulted: a future-dated task may be set to
    /// `Missed` and an overdue one to `Pending`. Only the next
    /// reconciliation sweep re-flags overdue open work.
    pub const fn set_explicit_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Overwrites every editable field from an edit form.
    pub fn apply_fields(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.due_date = fields.due_date;
        self.status = fields.status;
    }

    /// Replaces the manual order index.
    pub const fn set_order_index(&mut self, order_index: OrderIndex) {
        self.order_index = order_index;
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    due_date: Option<DueDate>,
    order_index: Option<OrderIndex>,
}

impl NewTask {
    /// Creates new task input with a required title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: TaskTitle::new(title)?,
            description: None,
            due_date: None,
            order_index: None,
        })
    }

    /// Sets the description. Blank descriptions are stored as absent.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets an explicit manual order index instead of the task identifier.
    #[must_use]
    pub const fn with_order_index(mut self, order_index: OrderIndex) -> Self {
        self.order_index = Some(order_index);
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the explicit order index, if one was requested.
    #[must_use]
    pub const fn order_index(&self) -> Option<OrderIndex> {
        self.order_index
    }

    /// Returns the status every new task starts with.
    #[must_use]
    pub const fn initial_status(&self) -> TaskStatus {
        TaskStatus::Pending
    }

    /// Materializes the task once the store has assigned an identifier.
    ///
    /// An absent or zero order index resolves to the identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        let status = self.initial_status();
        Task {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status,
            order_index: OrderIndex::resolve(self.order_index.map(OrderIndex::value), id),
        }
    }
}

/// Full-field overwrite submitted from the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    /// Replacement title.
    pub title: TaskTitle,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement due date.
    pub due_date: Option<DueDate>,
    /// Replacement status, applied without date re-derivation.
    pub status: TaskStatus,
}

impl TaskFields {
    /// Validates raw edit-form values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title or
    /// [`TaskDomainError::InvalidDueDate`] for a malformed due date. Blank
    /// due-date text clears the date.
    pub fn parse(
        title: impl Into<String>,
        description: Option<String>,
        due_date: Option<&str>,
        status: TaskStatus,
    ) -> Result<Self, TaskDomainError> {
        let validated_title = TaskTitle::new(title)?;
        let parsed_due_date = due_date
            .filter(|value| !value.trim().is_empty())
            .map(DueDate::parse)
            .transpose()?;
        Ok(Self {
            title: validated_title,
            description: description.and_then(normalize_description),
            due_date: parsed_due_date,
            status,
        })
    }
}

fn normalize_description(description: String) -> Option<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
