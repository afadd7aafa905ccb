//! First-class invariants for the puzzle.
//!
//! Invariants are logical properties that must hold throughout game
//! execution. They are testable independently and serve as
//! documentation of system guarantees. The session controller checks
//! them with `debug_assert!` after every mutation.

use crate::board::{Board, Cell, CELL_COUNT, PIECE_COUNT};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// The board holds each piece 0-14 exactly once and exactly one empty
/// slot.
pub struct PermutationInvariant;

impl Invariant<Board> for PermutationInvariant {
    fn holds(board: &Board) -> bool {
        let mut seen = [false; CELL_COUNT];
        let mut empties = 0usize;
        for cell in board.cells() {
            match cell {
                Cell::Piece(v) => {
                    let v = *v as usize;
                    if v >= PIECE_COUNT as usize || seen[v] {
                        return false;
                    }
                    seen[v] = true;
                }
                Cell::Empty => empties += 1,
            }
        }
        empties == 1 && seen[..PIECE_COUNT as usize].iter().all(|s| *s)
    }

    fn description() -> &'static str {
        "each piece 0-14 appears exactly once and the empty slot exactly once"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_permutation_holds_for_solved() {
        assert!(PermutationInvariant::holds(&Board::solved()));
    }

    #[test]
    fn test_permutation_holds_after_swaps() {
        let mut board = Board::solved();
        board.swap(15, 14);
        board.swap(14, 10);
        assert!(PermutationInvariant::holds(&board));
    }

    #[test]
    fn test_violation_description() {
        let v = InvariantViolation::new(PermutationInvariant::description());
        assert!(v.description.contains("exactly once"));
    }
}
