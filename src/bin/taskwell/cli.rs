//! Command-line arguments for the `taskwell` binary.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use taskwell::task::domain::{
    DueDate, MoveDirection, ParseSortModeError, SortMode, TaskDomainError,
};

#[derive(Debug, Parser)]
#[command(name = "taskwell")]
#[command(about = "Personal task tracker with a sortable to-do board", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// `SQLite` database file
    #[arg(long, global = true, env = "TASKWELL_DATABASE", default_value = "tasks.db")]
    pub database: String,

    /// Treat this date (YYYY-MM-DD) as today instead of reading the clock
    #[arg(long, global = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new pending task
    Add {
        /// Task title
        title: String,

        /// Task description
        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Show the to-do board after marking overdue tasks missed
    List {
        /// Sort mode: manual, due-date-asc, due-date-desc or priority
        #[arg(short, long, default_value = "manual", value_parser = parse_sort_mode)]
        sort: SortMode,
    },

    /// Show pending and missed tasks
    Open,

    /// Show tasks due on a calendar date
    Day {
        /// Calendar date (YYYY-MM-DD)
        #[arg(value_parser = DueDate::parse)]
        date: DueDate,
    },

    /// Mark a task done
    Check {
        /// Task ID
        id: i64,
    },

    /// Clear a task's done mark
    Uncheck {
        /// Task ID
        id: i64,
    },

    /// Set a task's status without consulting its due date
    Status {
        /// Task ID
        id: i64,

        /// New status: pending, done or missed
        status: String,
    },

    /// Overwrite a task's fields; omitted fields keep their current value
    Edit(EditArgs),

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },

    /// Move a task one place on the manual board and save the order
    Move {
        /// Task ID
        id: i64,

        /// Direction to move
        #[arg(value_enum)]
        direction: Direction,
    },

    /// Mark overdue pending tasks as missed
    Reconcile,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task ID
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description; pass an empty string to clear it
    #[arg(short, long)]
    pub description: Option<String>,

    /// New due date (YYYY-MM-DD); pass an empty string to clear it
    #[arg(long)]
    pub due: Option<String>,

    /// New status: pending, done or missed
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Towards the top of the board
    Up,
    /// Towards the bottom of the board
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
        }
    }
}

fn parse_sort_mode(value: &str) -> Result<SortMode, ParseSortModeError> {
    SortMode::try_from(value)
}

fn parse_date(value: &str) -> Result<NaiveDate, TaskDomainError> {
    DueDate::parse(value).map(DueDate::date)
}
