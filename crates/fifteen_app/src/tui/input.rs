//! Keyboard handling for the puzzle TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use fifteen_core::SIDE;

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Move the cell cursor.
    MoveCursor(KeyCode),
    /// Click the cell under the cursor.
    Click,
    /// Toggle the hint overlay (press/release pair).
    HintToggle,
    /// Start a new game.
    NewGame,
    /// Quit the application.
    Quit,
}

/// Maps a key event to a UI action, if any.
pub fn map_key(key: KeyEvent) -> Option<UiAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
        KeyCode::Char('n') => Some(UiAction::NewGame),
        KeyCode::Char('h') => Some(UiAction::HintToggle),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiAction::Click),
        code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
            Some(UiAction::MoveCursor(code))
        }
        _ => None,
    }
}

/// Moves the board cursor one cell, clamped to the 4x4 grid.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let row = cursor / SIDE;
    let col = cursor % SIDE;
    match key {
        KeyCode::Up if row > 0 => cursor - SIDE,
        KeyCode::Down if row < SIDE - 1 => cursor + SIDE,
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Right if col < SIDE - 1 => cursor + 1,
        _ => cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_grid() {
        assert_eq!(move_cursor(5, KeyCode::Up), 1);
        assert_eq!(move_cursor(5, KeyCode::Down), 9);
        assert_eq!(move_cursor(5, KeyCode::Left), 4);
        assert_eq!(move_cursor(5, KeyCode::Right), 6);
    }

    #[test]
    fn test_cursor_clamped_at_edges() {
        assert_eq!(move_cursor(0, KeyCode::Up), 0);
        assert_eq!(move_cursor(0, KeyCode::Left), 0);
        assert_eq!(move_cursor(15, KeyCode::Down), 15);
        assert_eq!(move_cursor(15, KeyCode::Right), 15);
        assert_eq!(move_cursor(3, KeyCode::Right), 3);
    }

    #[test]
    fn test_key_mapping() {
        use crossterm::event::KeyModifiers;
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(UiAction::Quit));
        assert_eq!(map_key(press(KeyCode::Char('n'))), Some(UiAction::NewGame));
        assert_eq!(map_key(press(KeyCode::Char('h'))), Some(UiAction::HintToggle));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(UiAction::Click));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }
}
