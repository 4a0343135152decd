use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use farewheel_core::PointerPosition;

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Previous,
    Next,
    /// Expand the front card
    Open,
    Close,
    SelectTab(usize),
    OpenDistancePrompt,
    ToggleNight,
    WaitingMore,
    WaitingLess,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Mouse event translated into carousel input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(PointerPosition),
    Move(PointerPosition),
    Up {
        position: PointerPosition,
        /// Card under the release point
        target: Option<usize>,
    },
    Wheel(f64),
    /// Click on a tab in the expanded view
    Tab(usize),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Carousel navigation
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::Previous,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::Next,
        (KeyCode::Left, KeyModifiers::NONE) => Action::Previous,
        (KeyCode::Right, KeyModifiers::NONE) => Action::Next,

        (KeyCode::Enter, KeyModifiers::NONE) => Action::Open,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Close,
        (KeyCode::Char('x'), KeyModifiers::NONE) => Action::Close,

        // Tabs are numbered from 1
        (KeyCode::Char(c), KeyModifiers::NONE) if c.is_ascii_digit() => {
            match c.to_digit(10).map(|d| d as usize) {
                Some(d) if d >= 1 && d <= app.carousel.len() => Action::SelectTab(d - 1),
                _ => Action::None,
            }
        }

        // Trip parameters
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::OpenDistancePrompt,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::ToggleNight,
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), KeyModifiers::NONE) => Action::WaitingMore,
        (KeyCode::Char('-'), KeyModifiers::NONE) => Action::WaitingLess,

        _ => Action::None,
    }
}

/// Handle key events in input mode (distance prompt)
fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), _) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Translate a mouse event using the hit areas from the last frame.
/// Terminal cells are the pointer units.
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> PointerInput {
    let position = PointerPosition::new(f64::from(mouse.column), f64::from(mouse.row));
    let notch = app.config.gesture.wheel_notch_delta;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match app.tab_at(mouse.column, mouse.row) {
            Some(tab) => PointerInput::Tab(tab),
            None => PointerInput::Down(position),
        },
        MouseEventKind::Drag(MouseButton::Left) => PointerInput::Move(position),
        MouseEventKind::Up(MouseButton::Left) => PointerInput::Up {
            position,
            target: app.card_at(mouse.column, mouse.row),
        },
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => PointerInput::Wheel(notch),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => PointerInput::Wheel(-notch),
        _ => PointerInput::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use farewheel_core::{AppConfig, MemoryFlagStore};
    use ratatui::layout::Rect;

    use super::*;
    use crate::app::{DistancePrompt, Mode};

    fn app() -> App {
        App::new(
            Arc::new(AppConfig::default()),
            Box::new(MemoryFlagStore::new()),
            Instant::now(),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_navigation_keys() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('h')), &app), Action::Previous);
        assert_eq!(handle_key_event(key(KeyCode::Right), &app), Action::Next);
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::Open);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::Close);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );
    }

    #[test]
    fn test_tab_digits_bounded_by_card_count() {
        let app = app();
        assert_eq!(handle_key_event(key(KeyCode::Char('1')), &app), Action::SelectTab(0));
        assert_eq!(handle_key_event(key(KeyCode::Char('3')), &app), Action::SelectTab(2));
        assert_eq!(handle_key_event(key(KeyCode::Char('4')), &app), Action::None);
        assert_eq!(handle_key_event(key(KeyCode::Char('0')), &app), Action::None);
    }

    #[test]
    fn test_prompt_captures_keys() {
        let mut app = app();
        app.mode = Mode::DistancePrompt(DistancePrompt::default());
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::InputChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::Confirm);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &app), Action::Cancel);
    }

    #[test]
    fn test_mouse_mapping() {
        let mut app = app();
        app.card_areas = vec![(1, Rect::new(50, 2, 20, 10))];

        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 4), &app),
            PointerInput::Down(PointerPosition::new(10.0, 4.0))
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 55, 4), &app),
            PointerInput::Up {
                position: PointerPosition::new(55.0, 4.0),
                target: Some(1),
            }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 0, 0), &app),
            PointerInput::Wheel(-60.0)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 0, 0), &app),
            PointerInput::None
        );
    }

    #[test]
    fn test_mouse_down_on_tab() {
        let mut app = app();
        app.tab_areas = vec![(2, Rect::new(20, 1, 8, 1))];
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 22, 1), &app),
            PointerInput::Tab(2)
        );
    }
}
