//! Text and JSON rendering of command results.

use serde::Serialize;
use serde_json::json;
use taskwell::task::domain::{StatusTransition, Task, TaskId, TaskStatus, TodoList};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn task(task: &Task, format: Format) -> eyre::Result<String> {
    match format {
        Format::Json => to_json(task),
        Format::Text => Ok(task_line(task)),
    }
}

pub fn tasks(tasks: &[Task], format: Format) -> eyre::Result<String> {
    match format {
        Format::Json => to_json(tasks),
        Format::Text => Ok(task_lines(tasks)),
    }
}

pub fn board(list: &TodoList, format: Format) -> eyre::Result<String> {
    match format {
        Format::Json => to_json(list),
        Format::Text => Ok(format!("Sort: {}\n{}", list.mode(), task_lines(list.tasks()))),
    }
}

pub fn transitions(transitions: &[StatusTransition], format: Format) -> eyre::Result<String> {
    match format {
        Format::Json => to_json(transitions),
        Format::Text if transitions.is_empty() => Ok("No overdue tasks.".to_owned()),
        Format::Text => Ok(transitions
            .iter()
            .map(|change| format!("#{}: {} -> {}", change.task_id, change.from, change.to))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

pub fn deleted(task_id: TaskId, format: Format) -> eyre::Result<String> {
    match format {
        Format::Json => to_json(&json!({ "deleted": task_id })),
        Format::Text => Ok(format!("Deleted task #{task_id}.")),
    }
}

/// Renders one task as `[x] #id title (status, due date)`.
#[must_use]
pub fn task_line(task: &Task) -> String {
    let mark = if task.status() == TaskStatus::Done {
        "[x]"
    } else {
        "[ ]"
    };
    let due = task
        .due_date()
        .map(|date| format!(", due {date}"))
        .unwrap_or_default();
    format!(
        "{mark} #{} {} ({}{due})",
        task.id(),
        task.title(),
        task.status()
    )
}

fn task_lines(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks.".to_owned();
    }
    tasks.iter().map(task_line).collect::<Vec<_>>().join("\n")
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
