//! Read-only rendering of the table and player boards.
//!
//! Everything here borrows the state immutably and produces plain
//! strings for the CLI to print: the factory listing the current
//! player drafts from, and each board with its wall template overlay.

use crate::board::{PlayerBoard, FLOOR_CAPACITY, WALL_SIZE, WALL_TEMPLATE};
use crate::core::player::PlayerId;
use crate::core::tile::{cell_char, Tile};
use crate::state::GameState;

/// The shared table: centres first, then numbered factories.
///
/// Factories are numbered from 1 to match the move syntax; centres are
/// labelled `C` and `D`.
#[must_use]
pub fn render_table(state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("Table Centre\n");
    for (index, centre) in state.centres().iter().enumerate() {
        let label = if index == 0 { 'C' } else { 'D' };
        out.push_str(&format!("{label}: "));
        out.extend(centre.iter().map(Tile::to_char));
        out.push('\n');
    }

    out.push_str("\nFactories\n");
    for (index, factory) in state.factories().iter().enumerate() {
        out.push_str(&format!("{}: ", index + 1));
        out.extend(factory.iter().map(Tile::to_char));
        out.push('\n');
    }

    out
}

/// One player's board: pattern lines beside the wall and its template,
/// then the floor line.
#[must_use]
pub fn render_board(board: &PlayerBoard) -> String {
    let mut out = String::new();

    for row in 0..WALL_SIZE {
        let line = board.line(row);
        let mut staged = "-".repeat(line.capacity() - line.len());
        staged.extend(line.iter().map(Tile::to_char));

        let wall: String = board.wall().row(row).iter().map(|c| cell_char(*c)).collect();
        let template: String = WALL_TEMPLATE[row].iter().map(|t| t.to_char()).collect();

        out.push_str(&format!("{}: {staged:>5} || {wall} <-> {template}\n", row + 1));
    }

    let floor = board.floor();
    let mut floor_cells: String = floor.iter().map(Tile::to_char).collect();
    floor_cells.push_str(&"-".repeat(FLOOR_CAPACITY - floor.len()));
    out.push_str(&format!("Floor: {floor_cells}\n"));

    out
}

/// A player's name, score, and board.
#[must_use]
pub fn render_player(state: &GameState, id: PlayerId) -> String {
    let player = state.player(id);
    format!(
        "Name: {}, Score: {}\n{}",
        player.name(),
        player.score(),
        render_board(player.board())
    )
}

/// Final standings, one line per player in table order.
#[must_use]
pub fn render_scores(state: &GameState) -> String {
    let mut out = String::new();
    for id in PlayerId::all(state.player_count()) {
        let player = state.player(id);
        out.push_str(&format!("{}: {} points\n", player.name(), player.score()));
    }
    out
}
