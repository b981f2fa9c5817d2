//! Application services for task lifecycle and to-do board orchestration.

mod board;
mod lifecycle;

pub use board::TodoBoardService;
pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
