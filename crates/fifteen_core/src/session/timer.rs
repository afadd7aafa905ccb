//! Wall-clock game timer with pause support.
//!
//! The timer starts lazily on the first legal move, pauses while the
//! hint overlay is up, and resumes from the recorded elapsed time.
//! Paused intervals never count toward the displayed time.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Stopped,
    Running { since: Instant },
    Paused,
}

/// Pausable elapsed-time tracker.
///
/// Public methods read `Instant::now()`; the `*_at` variants take an
/// explicit instant so tests can exercise pause arithmetic without
/// sleeping.
#[derive(Debug, Clone)]
pub struct GameTimer {
    state: TimerState,
    banked: Duration,
}

impl GameTimer {
    /// Creates a stopped timer with zero elapsed time.
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            banked: Duration::ZERO,
        }
    }

    /// True while the timer is accumulating time.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Starts the timer from zero. No-op if already running.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub(crate) fn start_at(&mut self, now: Instant) {
        if !self.is_running() {
            self.banked = Duration::ZERO;
            self.state = TimerState::Running { since: now };
        }
    }

    /// Pauses the timer, banking the elapsed time so far.
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub(crate) fn pause_at(&mut self, now: Instant) {
        if let TimerState::Running { since } = self.state {
            self.banked += now.saturating_duration_since(since);
            self.state = TimerState::Paused;
        }
    }

    /// Resumes a paused timer, continuing from the banked elapsed time.
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub(crate) fn resume_at(&mut self, now: Instant) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running { since: now };
        }
    }

    /// Stops the timer, freezing the elapsed time.
    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub(crate) fn stop_at(&mut self, now: Instant) {
        if let TimerState::Running { since } = self.state {
            self.banked += now.saturating_duration_since(since);
        }
        self.state = TimerState::Stopped;
    }

    /// Resets to stopped with zero elapsed time.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Elapsed play time, excluding paused intervals.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub(crate) fn elapsed_at(&self, now: Instant) -> Duration {
        match self.state {
            TimerState::Running { since } => self.banked + now.saturating_duration_since(since),
            _ => self.banked,
        }
    }

    /// Formats the elapsed time as `mm:ss`.
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a duration as `mm:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
