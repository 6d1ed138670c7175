//! Fixed-width ASCII rendering of the maze.
//!
//! The glyph set is a compatibility contract: `+` posts, `--` horizontal
//! walls, `|` vertical walls, `O` for the player's cell, one wall row and one
//! content row per maze row, and a closing border row at the bottom.

use maze_explorer_core::{CellCoord, Direction};
use maze_explorer_world::Grid;

/// Renders the grid with the player marked at `player`.
pub(crate) fn render(grid: &Grid, player: CellCoord) -> String {
    let size = grid.size();
    let mut out = String::new();

    for y in 0..size.height() {
        let mut top_row = String::new();
        let mut middle_row = String::new();

        for x in 0..size.width() {
            let cell = CellCoord::new(x, y);
            top_row.push_str(if grid.has_wall(cell, Direction::North) {
                "+--"
            } else {
                "+  "
            });
            middle_row.push_str(if grid.has_wall(cell, Direction::West) {
                "| "
            } else {
                "  "
            });
            middle_row.push(if cell == player { 'O' } else { ' ' });
        }

        top_row.push('+');
        middle_row.push('|');
        out.push_str(&top_row);
        out.push('\n');
        out.push_str(&middle_row);
        out.push('\n');
    }

    let mut bottom_row = String::from("+");
    for _ in 0..size.width() {
        bottom_row.push_str("--+");
    }
    out.push_str(&bottom_row);

    out
}
