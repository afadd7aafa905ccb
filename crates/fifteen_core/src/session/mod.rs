//! Game session: lifecycle state machine, timer, and event types.

mod controller;
mod events;
mod timer;

pub use controller::{
    HintInvariant, Mode, Phase, PieceSet, PieceSetError, Session, SessionConfig,
    DEFAULT_NUMBERED_PROBABILITY,
};
pub use events::{InputEvent, LoadAttempt, SessionEvent, WinSummary};
pub use timer::{format_elapsed, GameTimer};
