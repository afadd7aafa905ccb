//! Game session controller.
//!
//! Owns the board and all per-game state, and advances the lifecycle
//! `Idle -> Loading -> Playing <-> Hinting -> Won` in response to
//! input events. Asynchronous image loads are driven by the front end;
//! the controller tracks a monotonically increasing load generation so
//! completions from superseded loads are discarded.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::board::{Board, CELL_COUNT};
use crate::invariants::{Invariant, PermutationInvariant};
use crate::moves;
use crate::session::events::{InputEvent, LoadAttempt, SessionEvent, WinSummary};
use crate::session::timer::GameTimer;
use crate::shuffle::{Shuffler, DEFAULT_SHUFFLE_MOVES};

/// Probability of picking numbered mode for a new game.
pub const DEFAULT_NUMBERED_PROBABILITY: f64 = 0.10;

/// Session tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Probability in [0, 1] of choosing numbered mode over imaged
    /// mode when a new game starts.
    pub numbered_probability: f64,
    /// Number of random legal moves per shuffle.
    pub shuffle_moves: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            numbered_probability: DEFAULT_NUMBERED_PROBABILITY,
            shuffle_moves: DEFAULT_SHUFFLE_MOVES,
        }
    }
}

/// The 16 image handles for a sliced puzzle image, indexed by piece
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSet<P> {
    pieces: Vec<P>,
}

/// Error building a piece set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("expected 16 pieces, got {_0}")]
pub struct PieceSetError(pub usize);

impl std::error::Error for PieceSetError {}

impl<P> PieceSet<P> {
    /// Wraps exactly 16 piece handles.
    pub fn new(pieces: Vec<P>) -> Result<Self, PieceSetError> {
        if pieces.len() != CELL_COUNT {
            return Err(PieceSetError(pieces.len()));
        }
        Ok(Self { pieces })
    }

    /// Handle for the piece with the given value (0-14; 15 is the
    /// unused slice under the empty slot).
    pub fn piece(&self, value: u8) -> Option<&P> {
        self.pieces.get(value as usize)
    }
}

/// Rendering mode for the current game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<P> {
    /// Tiles show their number (`value + 1`).
    Numbered,
    /// Tiles show slices of a picture.
    Imaged(PieceSet<P>),
}

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No game yet.
    Idle,
    /// Waiting for image pieces (or the fallback chain) to complete.
    Loading,
    /// Accepting tile clicks.
    Playing,
    /// Solved board overlaid; the real board is snapshotted.
    Hinting,
    /// Puzzle solved.
    Won,
}

/// A game session, generic over the piece handle type so the core
/// stays free of image dependencies.
pub struct Session<P> {
    config: SessionConfig,
    rng: StdRng,
    shuffler: Shuffler,
    board: Board,
    mode: Mode<P>,
    phase: Phase,
    move_count: u32,
    timer: GameTimer,
    saved_board: Option<Board>,
    generation: u64,
    pending_attempt: Option<LoadAttempt>,
    last_win: Option<WinSummary>,
}

impl<P> Session<P> {
    /// Creates an idle session.
    pub fn new(config: SessionConfig) -> Self {
        Self::build(config, StdRng::from_entropy(), Shuffler::new())
    }

    /// Creates an idle session with deterministic randomness.
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::build(
            config,
            StdRng::seed_from_u64(seed),
            Shuffler::from_seed(seed.wrapping_add(1)),
        )
    }

    fn build(config: SessionConfig, rng: StdRng, shuffler: Shuffler) -> Self {
        Self {
            config,
            rng,
            shuffler,
            board: Board::solved(),
            mode: Mode::Numbered,
            phase: Phase::Idle,
            move_count: 0,
            timer: GameTimer::new(),
            saved_board: None,
            generation: 0,
            pending_attempt: None,
            last_win: None,
        }
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current rendering mode.
    pub fn mode(&self) -> &Mode<P> {
        &self.mode
    }

    /// Move gestures taken this game.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// The game timer.
    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    /// Current load generation (increments per new-game request).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Statistics of the last win, if any.
    pub fn last_win(&self) -> Option<WinSummary> {
        self.last_win
    }

    /// False while the hint overlay is up; the move count and timer
    /// displays are hidden then.
    pub fn stats_visible(&self) -> bool {
        self.phase != Phase::Hinting
    }

    /// Dispatches one player input event, returning the events the
    /// driver must act on.
    #[instrument(skip(self))]
    pub fn handle_input(&mut self, event: InputEvent) -> Vec<SessionEvent> {
        let out = match event {
            InputEvent::TileClicked(index) => self.tile_clicked(index),
            InputEvent::HintPressed => {
                self.hint_pressed();
                Vec::new()
            }
            InputEvent::HintReleased => {
                self.hint_released();
                Vec::new()
            }
            InputEvent::ShuffleRequested => self.start_new_game(),
        };
        debug_assert!(PermutationInvariant::holds(&self.board));
        debug_assert!(HintInvariant::holds(self));
        out
    }

    /// Starts a new game, superseding any in-flight load.
    #[instrument(skip(self))]
    pub fn start_new_game(&mut self) -> Vec<SessionEvent> {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.saved_board = None;
        self.pending_attempt = None;

        if self.rng.gen_bool(self.config.numbered_probability.clamp(0.0, 1.0)) {
            info!(generation = self.generation, "new game in numbered mode");
            self.mode = Mode::Numbered;
            self.begin_play();
            Vec::new()
        } else {
            let attempt = LoadAttempt::Remote { credentials: true };
            info!(generation = self.generation, "new game in imaged mode, loading");
            self.pending_attempt = Some(attempt);
            vec![SessionEvent::LoadRequested {
                generation: self.generation,
                attempt,
            }]
        }
    }

    /// Reports a successful image load for `generation`.
    #[instrument(skip(self, pieces))]
    pub fn load_succeeded(&mut self, generation: u64, pieces: PieceSet<P>) -> Vec<SessionEvent> {
        if self.is_stale(generation) {
            return Vec::new();
        }
        info!(generation, "image pieces ready");
        self.pending_attempt = None;
        self.mode = Mode::Imaged(pieces);
        self.begin_play();
        Vec::new()
    }

    /// Reports a failed (or timed-out) image load for `generation`,
    /// advancing the fallback chain.
    ///
    /// The chain is mandatory: remote with credentials, remote
    /// without, bundled image, numbered mode. The board is never left
    /// undisplayable.
    #[instrument(skip(self))]
    pub fn load_failed(&mut self, generation: u64) -> Vec<SessionEvent> {
        if self.is_stale(generation) {
            return Vec::new();
        }
        let next = match self.pending_attempt {
            Some(LoadAttempt::Remote { credentials: true }) => {
                Some(LoadAttempt::Remote { credentials: false })
            }
            Some(LoadAttempt::Remote { credentials: false }) => Some(LoadAttempt::Bundled),
            Some(LoadAttempt::Bundled) | None => None,
        };
        match next {
            Some(attempt) => {
                warn!(generation, ?attempt, "image load failed, advancing fallback chain");
                self.pending_attempt = Some(attempt);
                vec![SessionEvent::LoadRequested {
                    generation: self.generation,
                    attempt,
                }]
            }
            None => {
                warn!(generation, "fallback chain exhausted, playing numbered");
                self.pending_attempt = None;
                self.mode = Mode::Numbered;
                self.begin_play();
                Vec::new()
            }
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation != self.generation || self.phase != Phase::Loading {
            debug!(
                generation,
                current = self.generation,
                phase = ?self.phase,
                "discarding stale load completion"
            );
            true
        } else {
            false
        }
    }

    /// Shuffles and enters `Playing`. Counters reset; the timer stays
    /// stopped until the first legal move.
    fn begin_play(&mut self) {
        self.shuffler.shuffle(&mut self.board, self.config.shuffle_moves);
        self.move_count = 0;
        self.timer.reset();
        self.last_win = None;
        self.phase = Phase::Playing;
    }

    fn tile_clicked(&mut self, index: usize) -> Vec<SessionEvent> {
        if self.phase != Phase::Playing {
            debug!(index, phase = ?self.phase, "ignoring click outside play");
            return Vec::new();
        }
        let Some(slide) = moves::resolve(&self.board, index) else {
            // Illegal click: no state change, no move counted.
            return Vec::new();
        };

        moves::apply(&mut self.board, &slide);
        self.move_count += 1;
        if !self.timer.is_running() {
            // Lazy start: elapsed time counts from the first move.
            self.timer.start();
        }

        if self.board.is_solved() {
            self.timer.stop();
            let summary = WinSummary {
                moves: self.move_count,
                elapsed: self.timer.elapsed(),
            };
            self.last_win = Some(summary);
            self.phase = Phase::Won;
            info!(moves = summary.moves, elapsed = ?summary.elapsed, "puzzle solved");
            return vec![SessionEvent::Won(summary)];
        }
        Vec::new()
    }

    fn hint_pressed(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        debug!("hint overlay shown");
        self.saved_board = Some(self.board.clone());
        self.timer.pause();
        self.board = Board::solved();
        self.phase = Phase::Hinting;
    }

    fn hint_released(&mut self) {
        if self.phase != Phase::Hinting {
            return;
        }
        let Some(saved) = self.saved_board.take() else {
            // Unreachable through the public API; checked by HintInvariant.
            warn!("hint release with no snapshot");
            return;
        };
        debug!("hint overlay hidden");
        self.board = saved;
        self.timer.resume();
        self.phase = Phase::Playing;
    }
}

/// Hint overlay consistency: while hinting, the snapshot exists and
/// the live board shows the solved permutation.
pub struct HintInvariant;

impl<P> Invariant<Session<P>> for HintInvariant {
    fn holds(session: &Session<P>) -> bool {
        session.phase != Phase::Hinting
            || (session.saved_board.is_some() && session.board.is_solved())
    }

    fn description() -> &'static str {
        "hint active implies a saved snapshot and a solved overlay board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    /// Session with piece handles that are plain numbers.
    type TestSession = Session<u8>;

    fn pieces() -> PieceSet<u8> {
        PieceSet::new((0..16).collect()).expect("16 handles")
    }

    /// Seeded session guaranteed to pick imaged mode on the first
    /// new-game request (probability 0 of numbered).
    fn imaged_session() -> TestSession {
        let config = SessionConfig {
            numbered_probability: 0.0,
            ..SessionConfig::default()
        };
        Session::with_seed(config, 11)
    }

    fn numbered_session() -> TestSession {
        let config = SessionConfig {
            numbered_probability: 1.0,
            shuffle_moves: 100,
        };
        Session::with_seed(config, 11)
    }

    fn finish_load(session: &mut TestSession) {
        let generation = session.generation();
        let events = session.load_succeeded(generation, pieces());
        assert!(events.is_empty());
        assert_eq!(session.phase(), Phase::Playing);
    }

    /// Clicks a legal neighbor of the empty slot.
    fn make_legal_move(session: &mut TestSession) -> Vec<SessionEvent> {
        let empty = session.board().empty_index();
        let target = Board::neighbors(empty)[0];
        session.handle_input(InputEvent::TileClicked(target))
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = imaged_session();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_imaged_new_game_requests_credentialed_load() {
        let mut session = imaged_session();
        let events = session.handle_input(InputEvent::ShuffleRequested);
        assert_eq!(
            events,
            vec![SessionEvent::LoadRequested {
                generation: 1,
                attempt: LoadAttempt::Remote { credentials: true },
            }]
        );
        assert_eq!(session.phase(), Phase::Loading);
    }

    #[test]
    fn test_numbered_new_game_plays_immediately() {
        let mut session = numbered_session();
        let events = session.handle_input(InputEvent::ShuffleRequested);
        assert!(events.is_empty());
        assert_eq!(session.phase(), Phase::Playing);
        assert!(matches!(session.mode(), Mode::Numbered));
        assert!(!session.timer().is_running());
    }

    #[test]
    fn test_fallback_chain_order() {
        let mut session = imaged_session();
        session.handle_input(InputEvent::ShuffleRequested);

        let events = session.load_failed(1);
        assert_eq!(
            events,
            vec![SessionEvent::LoadRequested {
                generation: 1,
                attempt: LoadAttempt::Remote { credentials: false },
            }]
        );

        let events = session.load_failed(1);
        assert_eq!(
            events,
            vec![SessionEvent::LoadRequested {
                generation: 1,
                attempt: LoadAttempt::Bundled,
            }]
        );

        // Even the bundled image failing must leave a playable board.
        let events = session.load_failed(1);
        assert!(events.is_empty());
        assert_eq!(session.phase(), Phase::Playing);
        assert!(matches!(session.mode(), Mode::Numbered));
    }

    #[test]
    fn test_stale_load_completion_discarded() {
        let mut session = imaged_session();
        session.handle_input(InputEvent::ShuffleRequested);
        // A second request supersedes the first.
        session.handle_input(InputEvent::ShuffleRequested);
        assert_eq!(session.generation(), 2);

        let events = session.load_succeeded(1, pieces());
        assert!(events.is_empty());
        assert_eq!(session.phase(), Phase::Loading);

        finish_load(&mut session);
    }

    #[test]
    fn test_clicks_ignored_while_loading() {
        let mut session = imaged_session();
        session.handle_input(InputEvent::ShuffleRequested);
        let before = session.board().clone();
        session.handle_input(InputEvent::TileClicked(14));
        assert_eq!(*session.board(), before);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_first_move_starts_timer_and_counts_once() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);
        assert!(!session.timer().is_running());

        make_legal_move(&mut session);
        assert!(session.timer().is_running());
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn test_multi_tile_slide_counts_one_move() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);

        // Click the far end of the empty slot's row: a multi-tile
        // slide when the empty slot is not already there.
        let empty = session.board().empty_index();
        let row_start = (empty / 4) * 4;
        let target = if empty == row_start { row_start + 3 } else { row_start };
        let shifted = (target as i64 - empty as i64).unsigned_abs() as usize;
        assert!(shifted >= 1);

        session.handle_input(InputEvent::TileClicked(target));
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.board().empty_index(), target);
    }

    #[test]
    fn test_illegal_click_not_counted() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);

        // Click the empty slot itself.
        let empty = session.board().empty_index();
        session.handle_input(InputEvent::TileClicked(empty));
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_hint_round_trip_restores_board() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);
        make_legal_move(&mut session);
        let before = session.board().clone();

        session.handle_input(InputEvent::HintPressed);
        assert_eq!(session.phase(), Phase::Hinting);
        assert!(session.board().is_solved());
        assert!(!session.timer().is_running());
        assert!(!session.stats_visible());

        session.handle_input(InputEvent::HintReleased);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(*session.board(), before);
        assert!(session.timer().is_running());
        assert!(session.stats_visible());
    }

    #[test]
    fn test_hint_press_idempotent() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);
        make_legal_move(&mut session);
        let before = session.board().clone();

        session.handle_input(InputEvent::HintPressed);
        session.handle_input(InputEvent::HintPressed);
        session.handle_input(InputEvent::HintReleased);
        assert_eq!(*session.board(), before);
    }

    #[test]
    fn test_hint_release_without_press_is_noop() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);
        let before = session.board().clone();
        session.handle_input(InputEvent::HintReleased);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(*session.board(), before);
    }

    #[test]
    fn test_clicks_ignored_during_hint() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);
        make_legal_move(&mut session);

        session.handle_input(InputEvent::HintPressed);
        session.handle_input(InputEvent::TileClicked(14));
        assert_eq!(session.move_count(), 1);
        assert!(session.board().is_solved());
    }

    #[test]
    fn test_hint_before_first_game_is_noop() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::HintPressed);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_winning_move_emits_win_event() {
        // A one-move shuffle leaves the empty slot one step from home,
        // so one click solves the board regardless of the seed.
        let mut one_move = Session::<u8>::with_seed(
            SessionConfig {
                numbered_probability: 1.0,
                shuffle_moves: 1,
            },
            3,
        );
        one_move.handle_input(InputEvent::ShuffleRequested);
        assert_eq!(one_move.phase(), Phase::Playing);

        let events = one_move.handle_input(InputEvent::TileClicked(15));
        assert_eq!(one_move.phase(), Phase::Won);
        assert_eq!(events.len(), 1);
        let SessionEvent::Won(summary) = events[0] else {
            panic!("expected win event");
        };
        assert_eq!(summary.moves, 1);
        assert_eq!(one_move.last_win(), Some(summary));
        assert!(!one_move.timer().is_running());
    }

    #[test]
    fn test_new_game_from_won_state() {
        let mut session = Session::<u8>::with_seed(
            SessionConfig {
                numbered_probability: 1.0,
                shuffle_moves: 1,
            },
            3,
        );
        session.handle_input(InputEvent::ShuffleRequested);
        session.handle_input(InputEvent::TileClicked(15));
        assert_eq!(session.phase(), Phase::Won);

        session.handle_input(InputEvent::ShuffleRequested);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.last_win(), None);
    }

    #[test]
    fn test_piece_set_rejects_wrong_count() {
        assert!(PieceSet::new(vec![0u8; 15]).is_err());
        assert!(PieceSet::new(vec![0u8; 16]).is_ok());
    }

    #[test]
    fn test_piece_lookup() {
        let set = pieces();
        assert_eq!(set.piece(0), Some(&0));
        assert_eq!(set.piece(14), Some(&14));
        assert_eq!(set.piece(16), None);
    }

    #[test]
    fn test_permutation_preserved_through_lifecycle() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);
        for i in 0..16 {
            session.handle_input(InputEvent::TileClicked(i));
            assert!(PermutationInvariant::holds(session.board()));
        }
        session.handle_input(InputEvent::HintPressed);
        assert!(PermutationInvariant::holds(session.board()));
        session.handle_input(InputEvent::HintReleased);
        assert!(PermutationInvariant::holds(session.board()));
    }

    #[test]
    fn test_board_during_hint_shows_pieces_in_order() {
        let mut session = numbered_session();
        session.handle_input(InputEvent::ShuffleRequested);
        make_legal_move(&mut session);
        session.handle_input(InputEvent::HintPressed);
        for i in 0..15 {
            assert_eq!(session.board().get(i), Some(Cell::Piece(i as u8)));
        }
    }
}
