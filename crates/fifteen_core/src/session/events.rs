//! Event types flowing into and out of the session controller.
//!
//! Player input arrives as an explicit event enum dispatched
//! synchronously to the controller; the controller answers with
//! session events for the driver (front end) to act on. This keeps
//! all board mutation inside one input-handling turn.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Player input, dispatched synchronously to the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The player clicked the cell at the given board index.
    TileClicked(usize),
    /// The hint button was pressed (overlay the solved board).
    HintPressed,
    /// The hint button was released (restore the live board).
    HintReleased,
    /// New-game request: shuffle with a fresh image.
    ShuffleRequested,
}

/// One stage of the image-loading fallback chain.
///
/// The controller owns the chain position; the driver executes the
/// fetch and reports the outcome. Order: remote with credentials,
/// remote without, bundled fallback image, and finally numbered mode
/// (no load at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadAttempt {
    /// Fetch a remote image; `credentials` selects whether the
    /// configured auth header is sent.
    Remote {
        /// Send credentials with the request.
        credentials: bool,
    },
    /// Use the bundled fallback image, reachable with zero network
    /// access.
    Bundled,
}

/// Final statistics for a won game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinSummary {
    /// Number of move gestures taken.
    pub moves: u32,
    /// Play time, excluding hint pauses.
    pub elapsed: Duration,
}

/// Events the controller emits for the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Start an asynchronous image load. Completions must be reported
    /// back tagged with `generation`; stale generations are discarded.
    LoadRequested {
        /// Load generation this request belongs to.
        generation: u64,
        /// Which fallback-chain stage to execute.
        attempt: LoadAttempt,
    },
    /// The puzzle was solved. Emitted immediately after the winning
    /// move; the driver may delay its modal presentation.
    Won(WinSummary),
}
