//! Move resolution for tile clicks.
//!
//! A click is legal when the clicked cell shares a row or column with
//! the empty slot. Every cell between the clicked cell and the empty
//! slot (inclusive) shifts one step toward the empty slot's original
//! position; the whole gesture counts as a single move.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::{Board, SIDE};

/// Direction the affected tiles shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Tiles shift up (empty slot was above the clicked cell).
    Up,
    /// Tiles shift down.
    Down,
    /// Tiles shift left.
    Left,
    /// Tiles shift right.
    Right,
}

/// A resolved slide: which cells move and which way.
///
/// Ephemeral computation result, not persisted state. `cells` runs from
/// the clicked cell to the empty slot inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideMove {
    /// Affected indices, ordered from the clicked cell to the empty
    /// slot.
    pub cells: Vec<usize>,
    /// Shift direction of the tiles.
    pub direction: Direction,
}

impl SlideMove {
    /// Index of the clicked cell.
    pub fn clicked(&self) -> usize {
        self.cells[0]
    }

    /// Number of tiles that shift (excludes the empty slot itself).
    pub fn tile_count(&self) -> usize {
        self.cells.len() - 1
    }
}

/// Resolves a click at `clicked` against the current board.
///
/// Returns `None` for an illegal click: the clicked cell shares neither
/// row nor column with the empty slot, or it *is* the empty slot.
#[instrument(skip(board))]
pub fn resolve(board: &Board, clicked: usize) -> Option<SlideMove> {
    if clicked >= crate::board::CELL_COUNT {
        return None;
    }
    let empty = board.empty_index();
    if clicked == empty {
        // Clicking the empty slot shifts nothing.
        return None;
    }

    let (clicked_row, clicked_col) = (clicked / SIDE, clicked % SIDE);
    let (empty_row, empty_col) = (empty / SIDE, empty % SIDE);

    // Step walks from the clicked cell toward the empty slot, which is
    // also the direction the affected tiles shift.
    let (step, direction) = if clicked_row == empty_row {
        if clicked_col < empty_col {
            (1, Direction::Right)
        } else {
            (1usize.wrapping_neg(), Direction::Left)
        }
    } else if clicked_col == empty_col {
        if clicked_row < empty_row {
            (SIDE, Direction::Down)
        } else {
            (SIDE.wrapping_neg(), Direction::Up)
        }
    } else {
        debug!(clicked, empty, "illegal click: no shared row or column");
        return None;
    };

    // Walk from the clicked cell toward the empty slot.
    let mut cells = Vec::new();
    let mut i = clicked;
    loop {
        cells.push(i);
        if i == empty {
            break;
        }
        i = i.wrapping_add(step);
    }
    Some(SlideMove { cells, direction })
}

/// Applies a resolved slide to the board.
///
/// Walks from the empty slot toward the clicked cell one swap at a
/// time until the empty slot occupies the clicked index. Each affected
/// tile ends one step closer to the empty slot's original position.
#[instrument(skip(board, slide), fields(clicked = slide.clicked(), tiles = slide.tile_count()))]
pub fn apply(board: &mut Board, slide: &SlideMove) {
    // cells runs clicked -> empty; swap pairwise from the empty end.
    for pair in slide.cells.windows(2).rev() {
        board.swap(pair[0], pair[1]);
    }
    debug_assert_eq!(board.empty_index(), slide.clicked());
}
