//! Stateless rendering of the puzzle screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use fifteen_core::{format_elapsed, Cell, Mode, Phase, Session, WinSummary, SIDE};

use crate::images::Piece;

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;

/// Everything the renderer needs besides the session itself.
pub struct ViewState {
    /// Board index under the cursor.
    pub cursor: usize,
    /// Show the loading banner (real loading, or the minimum display
    /// interval after a new game).
    pub loading: bool,
    /// Show the win modal (the win event is delayed a beat before the
    /// modal appears).
    pub win_modal: Option<WinSummary>,
}

/// Renders one frame.
pub fn draw(frame: &mut Frame, session: &Session<Piece>, view: &ViewState) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                         // Title
            Constraint::Min(SIDE as u16 * CELL_HEIGHT + 2), // Board
            Constraint::Length(3),                         // Status
        ])
        .split(area);

    let title = Paragraph::new("Fifteen")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], session, view);
    draw_status(frame, chunks[2], session, view);

    if let Some(summary) = view.win_modal {
        draw_win_modal(frame, area, summary);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, session: &Session<Piece>, view: &ViewState) {
    let board_area = center_rect(area, SIDE as u16 * CELL_WIDTH, SIDE as u16 * CELL_HEIGHT);

    for row in 0..SIDE {
        for col in 0..SIDE {
            let index = row * SIDE + col;
            // Cells past the edge of a small terminal are clipped
            // rather than rendered out of bounds.
            let cell_area = Rect {
                x: board_area.x + col as u16 * CELL_WIDTH,
                y: board_area.y + row as u16 * CELL_HEIGHT,
                width: CELL_WIDTH,
                height: CELL_HEIGHT,
            }
            .intersection(area);
            if cell_area.is_empty() {
                continue;
            }
            draw_cell(frame, cell_area, session, view, index);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    session: &Session<Piece>,
    view: &ViewState,
    index: usize,
) {
    let is_cursor = index == view.cursor && session.phase() == Phase::Playing;
    let border_style = if is_cursor {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // While loading, cells render blank regardless of mode.
    let cell = if view.loading {
        Cell::Empty
    } else {
        session.board().get(index).unwrap_or(Cell::Empty)
    };

    let (label, style) = match cell {
        Cell::Empty => (String::new(), Style::default()),
        Cell::Piece(value) => match session.mode() {
            Mode::Numbered => (
                format!("{}", value + 1),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Mode::Imaged(pieces) => {
                let background = pieces
                    .piece(value)
                    .map(|p| Color::Rgb(p.average[0], p.average[1], p.average[2]))
                    .unwrap_or(Color::DarkGray);
                (
                    format!("{}", value + 1),
                    Style::default().bg(background).fg(Color::Black),
                )
            }
        },
    };

    let widget = Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    frame.render_widget(widget, area);
}

fn draw_status(frame: &mut Frame, area: Rect, session: &Session<Piece>, view: &ViewState) {
    let status = if view.loading {
        "Loading picture...".to_string()
    } else if !session.stats_visible() {
        // Hint overlay up: move count and timer displays are hidden.
        "Peeking at the solution - release h to resume".to_string()
    } else {
        format!(
            "Moves: {}   Time: {}   [arrows] move  [enter] slide  [h] hint  [n] new  [q] quit",
            session.move_count(),
            session.timer().display(),
        )
    };

    let widget = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn draw_win_modal(frame: &mut Frame, area: Rect, summary: WinSummary) {
    let modal = center_rect(area, 44, 5);
    let text = format!(
        "Solved in {} moves, {}!\nPress n for a new game.",
        summary.moves,
        format_elapsed(summary.elapsed),
    );
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" You won! "));
    frame.render_widget(Clear, modal);
    frame.render_widget(widget, modal);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
