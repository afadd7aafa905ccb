//! Core board model for the 15-puzzle.

use serde::{Deserialize, Serialize};
use tracing::error;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 16;

/// Number of rows/columns.
pub const SIDE: usize = 4;

/// Number of movable pieces.
pub const PIECE_COUNT: u8 = 15;

/// A cell on the board.
///
/// Modeled as a proper sum type rather than a sentinel value so that
/// "piece 15" cannot exist by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// A movable piece, numbered 0-14. Displayed as `value + 1`.
    Piece(u8),
    /// The empty slot.
    Empty,
}

/// 4x4 sliding-puzzle board.
///
/// Invariant: each piece 0-14 appears exactly once and `Empty` appears
/// exactly once. Every constructor and mutation preserves this; a board
/// observed in violation is a programming error, not a recoverable
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (`row = i / 4`, `col = i % 4`).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates the solved board: piece i at index i, empty at index 15.
    pub fn solved() -> Self {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, cell) in cells.iter_mut().enumerate().take(PIECE_COUNT as usize) {
            *cell = Cell::Piece(i as u8);
        }
        Self { cells }
    }

    /// Gets the cell at the given index (0-15).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns the index of the empty slot.
    ///
    /// # Panics
    ///
    /// Panics if the board holds no empty cell. That can only happen
    /// through a corrupted permutation, which is fatal (see
    /// [`crate::invariants::PermutationInvariant`]).
    pub fn empty_index(&self) -> usize {
        match self.cells.iter().position(|c| *c == Cell::Empty) {
            Some(i) => i,
            None => {
                error!(board = ?self.cells, "board permutation corrupted: no empty cell");
                panic!("board invariant violated: no empty cell");
            }
        }
    }

    /// Returns the orthogonally adjacent indices of `index`.
    ///
    /// Corner cells have 2 neighbors, edge cells 3, interior cells 4.
    pub fn neighbors(index: usize) -> Vec<usize> {
        let row = index / SIDE;
        let col = index % SIDE;
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push(index - SIDE);
        }
        if row < SIDE - 1 {
            out.push(index + SIDE);
        }
        if col > 0 {
            out.push(index - 1);
        }
        if col < SIDE - 1 {
            out.push(index + 1);
        }
        out
    }

    /// Exchanges the cells at `i` and `j` in place.
    ///
    /// Performs no legality check; callers (the move resolver and the
    /// shuffler) only pass adjacent pairs.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.cells.swap(i, j);
    }

    /// True iff every piece sits at its home index and the empty slot
    /// is at index 15.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .take(PIECE_COUNT as usize)
            .all(|(i, c)| *c == Cell::Piece(i as u8))
            && self.cells[CELL_COUNT - 1] == Cell::Empty
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::solved()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                match self.cells[row * SIDE + col] {
                    Cell::Piece(v) => write!(f, "{:>3}", v + 1)?,
                    Cell::Empty => write!(f, "  .")?,
                }
            }
            if row < SIDE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Checks whether a board is reachable from the solved state by legal
/// moves.
///
/// Standard inversion-parity argument for a 4x4 board: counting
/// inversions among the pieces in row-major order, a position is
/// solvable iff the inversion count plus the row of the empty slot has
/// the same parity as the solved position (empty on row 3, zero
/// inversions).
pub fn is_solvable(board: &Board) -> bool {
    let pieces: Vec<u8> = board
        .cells()
        .iter()
        .filter_map(|c| match c {
            Cell::Piece(v) => Some(*v),
            Cell::Empty => None,
        })
        .collect();

    let mut inversions = 0usize;
    for i in 0..pieces.len() {
        for j in i + 1..pieces.len() {
            if pieces[i] > pieces[j] {
                inversions += 1;
            }
        }
    }

    let empty_row = board.empty_index() / SIDE;
    (inversions + empty_row) % 2 == (SIDE - 1) % 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_layout() {
        let board = Board::solved();
        for i in 0..15 {
            assert_eq!(board.get(i), Some(Cell::Piece(i as u8)));
        }
        assert_eq!(board.get(15), Some(Cell::Empty));
        assert!(board.is_solved());
    }

    #[test]
    fn test_empty_index_solved() {
        assert_eq!(Board::solved().empty_index(), 15);
    }

    #[test]
    fn test_neighbors_corner() {
        assert_eq!(Board::neighbors(0), vec![4, 1]);
        assert_eq!(Board::neighbors(15), vec![11, 14]);
    }

    #[test]
    fn test_neighbors_interior() {
        let mut n = Board::neighbors(5);
        n.sort_unstable();
        assert_eq!(n, vec![1, 4, 6, 9]);
    }

    #[test]
    fn test_neighbors_edge() {
        let mut n = Board::neighbors(7);
        n.sort_unstable();
        assert_eq!(n, vec![3, 6, 11]);
    }

    #[test]
    fn test_swap_moves_empty() {
        let mut board = Board::solved();
        board.swap(15, 14);
        assert_eq!(board.empty_index(), 14);
        assert_eq!(board.get(15), Some(Cell::Piece(14)));
        assert!(!board.is_solved());
    }

    #[test]
    fn test_adjacent_transposition_not_solved() {
        let mut board = Board::solved();
        board.swap(0, 1);
        assert!(!board.is_solved());
    }

    #[test]
    fn test_solved_is_solvable() {
        assert!(is_solvable(&Board::solved()));
    }

    #[test]
    fn test_single_transposition_unsolvable() {
        // Swapping two pieces (not the empty slot) flips parity.
        let mut board = Board::solved();
        board.swap(0, 1);
        assert!(!is_solvable(&board));
    }

    #[test]
    fn test_legal_swap_stays_solvable() {
        let mut board = Board::solved();
        board.swap(15, 11);
        assert!(is_solvable(&board));
        board.swap(11, 10);
        assert!(is_solvable(&board));
    }
}
