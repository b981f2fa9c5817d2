//! To-do board integration tests against the in-memory repository.

use super::helpers::{TaskContext, context, create_task, task_id};
use rstest::rstest;
use taskwell::task::{
    domain::{MoveDirection, SortMode, TaskId, TaskStatus, TodoList},
    ports::TaskRepositoryError,
    services::{CreateTaskRequest, TaskLifecycleError},
};

fn ids(list: &TodoList) -> Vec<i64> {
    list.ids().into_iter().map(TaskId::value).collect()
}

async fn seed(context: &TaskContext) -> Result<(), eyre::Report> {
    create_task(&context.service, "Later", Some("2024-09-01")).await?;
    create_task(&context.service, "Overdue", Some("2024-05-01")).await?;
    create_task(&context.service, "Undated", None).await?;
    create_task(&context.service, "Soon", Some("2024-06-05")).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opening_the_board_reconciles_before_sorting(
    context: TaskContext,
) -> Result<(), eyre::Report> {
    seed(&context).await?;

    let board = context.board.open(SortMode::DueDateAsc).await?;

    assert_eq!(ids(&board), vec![2, 4, 1, 3]);
    assert_eq!(board.tasks().first().map(|task| task.status()), Some(TaskStatus::Missed));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manual_board_follows_creation_order_by_default(
    context: TaskContext,
) -> Result<(), eyre::Report> {
    seed(&context).await?;

    let board = context.board.open(SortMode::Manual).await?;

    assert_eq!(ids(&board), vec![1, 2, 3, 4]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn explicit_order_index_on_create_is_respected(
    context: TaskContext,
) -> Result<(), eyre::Report> {
    seed(&context).await?;
    context
        .service
        .create_task(CreateTaskRequest::new("Pinned").with_order_index(0))
        .await?;
    context
        .service
        .create_task(CreateTaskRequest::new("First").with_order_index(-1))
        .await?;

    let board = context.board.open(SortMode::Manual).await?;

    // An order index of zero counts as unset and falls back to the id.
    assert_eq!(ids(&board), vec![6, 1, 2, 3, 4, 5]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_moves_survive_a_reload(context: TaskContext) -> Result<(), eyre::Report> {
    seed(&context).await?;
    let board = context.board.open(SortMode::Manual).await?;

    let raised = context.board.reorder(&board, task_id(4), MoveDirection::Up);
    let moved = context.board.reorder(&raised, task_id(1), MoveDirection::Down);
    let saved = context.board.save_order(&moved).await?;
    let reloaded = context.board.refresh(&saved).await?;

    assert_eq!(ids(&moved), vec![2, 1, 4, 3]);
    assert_eq!(ids(&reloaded), ids(&moved));
    let indices: Vec<i64> = reloaded
        .tasks()
        .iter()
        .map(|task| task.order_index().value())
        .collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn changing_sort_mode_discards_unsaved_moves(
    context: TaskContext,
) -> Result<(), eyre::Report> {
    seed(&context).await?;
    let board = context.board.open(SortMode::Manual).await?;
    let moved = context.board.reorder(&board, task_id(3), MoveDirection::Up);

    let dated = context.board.change_sort_mode(&moved, SortMode::DueDateDesc).await?;
    let manual = context.board.change_sort_mode(&dated, SortMode::Manual).await?;

    assert_eq!(dated.mode(), SortMode::DueDateDesc);
    assert_eq!(ids(&dated), vec![2, 1, 4, 3]);
    assert_eq!(ids(&manual), vec![1, 2, 3, 4]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_a_date_sorted_board_adopts_it_as_manual_order(
    context: TaskContext,
) -> Result<(), eyre::Report> {
    seed(&context).await?;
    let board = context.board.open(SortMode::DueDateAsc).await?;

    context.board.save_order(&board).await?;
    let manual = context.board.change_sort_mode(&board, SortMode::Manual).await?;

    assert_eq!(ids(&manual), ids(&board));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggling_keeps_manual_sequence(context: TaskContext) -> Result<(), eyre::Report> {
    seed(&context).await?;
    let board = context.board.open(SortMode::Manual).await?;
    let moved = context.board.reorder(&board, task_id(2), MoveDirection::Down);

    let toggled = context.board.toggle(&moved, task_id(2), true).await?;

    assert_eq!(ids(&toggled), vec![1, 3, 2, 4]);
    assert_eq!(toggled.tasks().get(2).map(|task| task.status()), Some(TaskStatus::Done));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggling_resorts_date_ordered_boards(context: TaskContext) -> Result<(), eyre::Report> {
    seed(&context).await?;
    let board = context.board.open(SortMode::DueDateAsc).await?;

    let checked = context.board.toggle(&board, task_id(2), true).await?;
    let unchecked = context.board.toggle(&checked, task_id(2), false).await?;

    assert_eq!(ids(&checked), vec![4, 1, 3, 2]);
    assert_eq!(ids(&unchecked), vec![2, 4, 1, 3]);
    assert_eq!(
        unchecked.tasks().first().map(|task| task.status()),
        Some(TaskStatus::Missed)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_a_stale_board_changes_nothing(context: TaskContext) -> Result<(), eyre::Report> {
    seed(&context).await?;
    let board = context.board.open(SortMode::Manual).await?;
    let moved = context.board.reorder(&board, task_id(4), MoveDirection::Up);
    context.service.delete_task(task_id(1)).await?;

    let result = context.board.save_order(&moved).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(id))) if id == task_id(1)
    ));
    let reloaded = context.board.refresh(&board).await?;
    let indices: Vec<i64> = reloaded
        .tasks()
        .iter()
        .map(|task| task.order_index().value())
        .collect();
    assert_eq!(indices, vec![2, 3, 4]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_an_empty_board_is_a_no_op(context: TaskContext) -> Result<(), eyre::Report> {
    let board = context.board.open(SortMode::Manual).await?;

    let saved = context.board.save_order(&board).await?;

    assert!(saved.is_empty());
    Ok(())
}
