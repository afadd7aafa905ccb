//! Terminal front end.
//!
//! The presentation adapter for the puzzle: renders the session's
//! board to a ratatui surface and feeds keyboard input back as session
//! events. Image loads run as tokio tasks; their completions come back
//! over a channel tagged with the load generation they belong to, so
//! the session can discard stale ones.

mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use fifteen_core::{InputEvent, Phase, PieceSet, Session, SessionEvent};

use crate::config::AppConfig;
use crate::images::{fetch_pieces, Piece};
use input::UiAction;
use ui::ViewState;

/// How long the loading banner stays up at minimum, so a numbered game
/// doesn't flash it for a single frame.
const MIN_LOADING_DISPLAY: Duration = Duration::from_millis(300);

/// Delay between the win event and the modal, leaving the solved board
/// visible for a beat.
const WIN_MODAL_DELAY: Duration = Duration::from_millis(1500);

/// A finished image-load attempt.
struct LoadMessage {
    generation: u64,
    outcome: Option<PieceSet<Piece>>,
}

/// Runs the puzzle until the player quits.
pub async fn run(config: AppConfig, seed: Option<u64>) -> Result<()> {
    let mut session: Session<Piece> = match seed {
        Some(seed) => Session::with_seed(config.session_config(), seed),
        None => Session::new(config.session_config()),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_game(&mut terminal, &mut session, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "game loop error");
    }
    res
}

async fn run_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session<Piece>,
    config: &AppConfig,
) -> Result<()> {
    let client = reqwest::Client::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<LoadMessage>();

    let mut cursor = 0usize;
    let mut loading_shown_until = Instant::now() + MIN_LOADING_DISPLAY;
    let mut won_at: Option<Instant> = None;

    info!("starting first game");
    let events = session.handle_input(InputEvent::ShuffleRequested);
    act_on(events, config, &client, &tx, &mut won_at);

    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    loop {
        let view = ViewState {
            cursor,
            loading: session.phase() == Phase::Loading || Instant::now() < loading_shown_until,
            win_modal: match (session.phase(), won_at) {
                (Phase::Won, Some(at)) if at.elapsed() >= WIN_MODAL_DELAY => session.last_win(),
                _ => None,
            },
        };
        terminal.draw(|frame| ui::draw(frame, session, &view))?;

        tokio::select! {
            _ = ticker.tick() => {
                // Drain pending key events; the tick also refreshes the
                // one-second timer display.
                while event::poll(Duration::ZERO)? {
                    let Event::Key(key) = event::read()? else {
                        continue;
                    };
                    let Some(action) = input::map_key(key) else {
                        continue;
                    };
                    match action {
                        UiAction::Quit => return Ok(()),
                        UiAction::MoveCursor(code) => {
                            cursor = input::move_cursor(cursor, code);
                        }
                        UiAction::Click => {
                            let events = click_events(session, cursor, view.loading);
                            act_on(events, config, &client, &tx, &mut won_at);
                        }
                        UiAction::HintToggle => {
                            let event = if session.phase() == Phase::Hinting {
                                InputEvent::HintReleased
                            } else {
                                InputEvent::HintPressed
                            };
                            let events = session.handle_input(event);
                            act_on(events, config, &client, &tx, &mut won_at);
                        }
                        UiAction::NewGame => {
                            loading_shown_until = Instant::now() + MIN_LOADING_DISPLAY;
                            won_at = None;
                            let events = session.handle_input(InputEvent::ShuffleRequested);
                            act_on(events, config, &client, &tx, &mut won_at);
                        }
                    }
                }
            }
            Some(message) = rx.recv() => {
                debug!(generation = message.generation, ok = message.outcome.is_some(), "load attempt finished");
                let events = match message.outcome {
                    Some(pieces) => session.load_succeeded(message.generation, pieces),
                    None => session.load_failed(message.generation),
                };
                act_on(events, config, &client, &tx, &mut won_at);
            }
        }
    }
}

/// Forwards a click to the session, unless the loading banner is up.
/// The board renders blank under the banner even when a numbered game
/// is already playable, so clicks would land on invisible tiles.
fn click_events(
    session: &mut Session<Piece>,
    cursor: usize,
    banner_up: bool,
) -> Vec<SessionEvent> {
    if banner_up {
        return Vec::new();
    }
    session.handle_input(InputEvent::TileClicked(cursor))
}

/// Executes the session's requested effects: spawns load attempts and
/// records win timing.
fn act_on(
    events: Vec<SessionEvent>,
    config: &AppConfig,
    client: &reqwest::Client,
    tx: &mpsc::UnboundedSender<LoadMessage>,
    won_at: &mut Option<Instant>,
) {
    for event in events {
        match event {
            SessionEvent::LoadRequested { generation, attempt } => {
                debug!(generation, ?attempt, "spawning load attempt");
                let client = client.clone();
                let images = config.images.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let outcome = match fetch_pieces(&client, &images, attempt).await {
                        Ok(pieces) => Some(pieces),
                        Err(err) => {
                            // Recoverable: the controller advances the
                            // fallback chain.
                            tracing::warn!(error = %err, generation, "load attempt failed");
                            None
                        }
                    };
                    let _ = tx.send(LoadMessage { generation, outcome });
                });
            }
            SessionEvent::Won(summary) => {
                info!(moves = summary.moves, elapsed = ?summary.elapsed, "win event");
                *won_at = Some(Instant::now());
            }
        }
    }
}
