//! When steps for to-do ordering BDD scenarios.

use super::world::{TodoOrderingWorld, parse_mode, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskwell::task::domain::MoveDirection;

#[when(r#"the board is opened in "{mode}" mode"#)]
fn board_is_opened(world: &mut TodoOrderingWorld, mode: String) -> Result<(), eyre::Report> {
    let sort_mode = parse_mode(&mode)?;
    let board = run_async(world.board_service()?.open(sort_mode)).wrap_err("open board")?;
    world.board = Some(board);
    Ok(())
}

#[when(r#"task "{title}" is moved up"#)]
fn task_is_moved_up(world: &mut TodoOrderingWorld, title: String) -> Result<(), eyre::Report> {
    move_task(world, &title, MoveDirection::Up)
}

#[when(r#"task "{title}" is moved down"#)]
fn task_is_moved_down(world: &mut TodoOrderingWorld, title: String) -> Result<(), eyre::Report> {
    move_task(world, &title, MoveDirection::Down)
}

#[when("the manual order is saved")]
fn manual_order_is_saved(world: &mut TodoOrderingWorld) -> Result<(), eyre::Report> {
    let service = world.board_service()?;
    let saved = run_async(service.save_order(world.current_board()?)).wrap_err("save order")?;
    world.board = Some(saved);
    Ok(())
}

#[when(r#"the sort mode changes to "{mode}""#)]
fn sort_mode_changes(world: &mut TodoOrderingWorld, mode: String) -> Result<(), eyre::Report> {
    let sort_mode = parse_mode(&mode)?;
    let service = world.board_service()?;
    let board = run_async(service.change_sort_mode(world.current_board()?, sort_mode))
        .wrap_err("change sort mode")?;
    world.board = Some(board);
    Ok(())
}

fn move_task(
    world: &mut TodoOrderingWorld,
    title: &str,
    direction: MoveDirection,
) -> Result<(), eyre::Report> {
    let id = world.task_id(title)?;
    let moved = world
        .board_service()?
        .reorder(world.current_board()?, id, direction);
    world.board = Some(moved);
    Ok(())
}
