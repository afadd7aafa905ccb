//! fifteen_core - pure 15-puzzle game logic
//!
//! The board model, shuffle engine, move resolver, and session
//! controller for a 4x4 sliding-tile puzzle. No I/O lives here: image
//! loading and rendering are a front end's job, wired to the session
//! through input events and load completions.
//!
//! # Architecture
//!
//! - **Board**: the 16-cell permutation and its query/mutation
//!   primitives
//! - **Shuffle**: solvable-by-construction randomization via legal
//!   moves
//! - **Moves**: click resolution into single- or multi-tile slides
//! - **Session**: lifecycle state machine with timer, hint overlay,
//!   and the image-load fallback chain
//!
//! # Example
//!
//! ```
//! use fifteen_core::{InputEvent, Session, SessionConfig};
//!
//! // Piece handles are opaque to the core; a front end supplies its
//! // own image type. Numbered mode needs none.
//! let config = SessionConfig {
//!     numbered_probability: 1.0,
//!     ..SessionConfig::default()
//! };
//! let mut session: Session<()> = Session::new(config);
//! session.handle_input(InputEvent::ShuffleRequested);
//! assert!(!session.board().is_solved());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod invariants;
mod moves;
mod session;
mod shuffle;

// Crate-level exports - board model
pub use board::{is_solvable, Board, Cell, CELL_COUNT, PIECE_COUNT, SIDE};

// Crate-level exports - invariants
pub use invariants::{Invariant, InvariantViolation, PermutationInvariant};

// Crate-level exports - move resolution
pub use moves::{apply, resolve, Direction, SlideMove};

// Crate-level exports - shuffling
pub use shuffle::{Shuffler, DEFAULT_SHUFFLE_MOVES};

// Crate-level exports - session management
pub use session::{
    format_elapsed, GameTimer, HintInvariant, InputEvent, LoadAttempt, Mode, Phase, PieceSet,
    PieceSetError, Session, SessionConfig, SessionEvent, WinSummary, DEFAULT_NUMBERED_PROBABILITY,
};
