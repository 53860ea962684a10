//! Keymap
//!
//! Vim-style key bindings mapped to actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    HalfPageUp,
    HalfPageDown,

    // Tabs
    NextTab,
    ShowAdd,
    ShowList,

    // CRUD
    Delete,
    Refresh,

    // Clipboard
    CopyPassword,
    CopyUsername,

    // View
    TogglePasswordVisibility,

    // Search
    EnterSearch,
    ClearSearch,

    // Confirmation
    Confirm,
    Cancel,

    // Application
    Quit,

    // Text input
    InsertChar(char),
    DeleteChar,
    DeleteCharForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearLine,
    Submit,

    // No action
    None,
}

/// Map key event to action in normal mode
pub fn normal_mode_action(key: KeyEvent, pending: Option<char>) -> (Action, Option<char>) {
    match (key.code, key.modifiers, pending) {
        // Navigation
        (KeyCode::Char('j') | KeyCode::Down, _, _) => (Action::MoveDown, None),
        (KeyCode::Char('k') | KeyCode::Up, _, _) => (Action::MoveUp, None),
        (KeyCode::Char('g'), _, None) => (Action::None, Some('g')),
        (KeyCode::Char('g'), _, Some('g')) => (Action::MoveToTop, None),
        (KeyCode::Char('G'), _, _) => (Action::MoveToBottom, None),
        (KeyCode::Char('d'), KeyModifiers::CONTROL, _) => (Action::HalfPageDown, None),
        (KeyCode::Char('u'), KeyModifiers::CONTROL, _) => (Action::HalfPageUp, None),
        (KeyCode::Char('c'), KeyModifiers::CONTROL, _) => (Action::Quit, None),

        // Tabs
        (KeyCode::Tab | KeyCode::BackTab, _, _) => (Action::NextTab, None),
        (KeyCode::Char('n') | KeyCode::Char('a') | KeyCode::Char('2'), _, _) => (Action::ShowAdd, None),
        (KeyCode::Char('1'), _, _) => (Action::ShowList, None),

        // CRUD
        (KeyCode::Char('d'), _, None) => (Action::None, Some('d')),
        (KeyCode::Char('d'), _, Some('d')) => (Action::Delete, None),
        (KeyCode::Char('x'), _, _) => (Action::Delete, None),
        (KeyCode::Char('r'), _, _) => (Action::Refresh, None),

        // Clipboard
        (KeyCode::Char('y'), _, None) => (Action::None, Some('y')),
        (KeyCode::Char('y'), _, Some('y')) => (Action::CopyPassword, None),
        (KeyCode::Char('c'), _, _) => (Action::CopyPassword, None),
        (KeyCode::Char('u'), _, _) => (Action::CopyUsername, None),

        // View
        (KeyCode::Char('s'), _, _) => (Action::TogglePasswordVisibility, None),

        // Search
        (KeyCode::Char('/'), _, _) => (Action::EnterSearch, None),
        (KeyCode::Esc, _, _) => (Action::ClearSearch, None),

        // Application
        (KeyCode::Char('q'), _, _) => (Action::Quit, None),

        _ => (Action::None, None),
    }
}

/// Map key event to action in text input modes
pub fn text_input_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Delete, _) => Action::DeleteCharForward,
        (KeyCode::Left, _) => Action::CursorLeft,
        (KeyCode::Right, _) => Action::CursorRight,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::CursorHome,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::CursorEnd,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearLine,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Map key event to action in confirm mode
pub fn confirm_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}
