//! Input Modes
//!
//! Modal editing state machine for vim-style interface.

/// Input mode enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Editing the add-credential form
    Insert,
    /// Live credential search (/)
    Search,
    /// Confirmation dialog
    Confirm,
    /// Tag selection dropdown
    Tags,
}

impl InputMode {
    /// Get mode indicator for status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Search => "SEARCH",
            Self::Confirm => "CONFIRM",
            Self::Tags => "TAGS",
        }
    }
}

/// Byte offset of the `char_idx`-th character, or the string length
pub fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

/// Mode state with associated data
#[derive(Debug, Clone)]
pub struct ModeState {
    /// Current mode
    pub mode: InputMode,
    /// Text buffer for the search line
    pub buffer: String,
    /// Cursor position in buffer, in characters
    pub cursor: usize,
    /// Pending key sequence (for multi-key commands like gg, dd)
    pub pending: Option<char>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            buffer: String::new(),
            cursor: 0,
            pending: None,
        }
    }
}

impl ModeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a new mode
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.buffer.clear();
        self.cursor = 0;
        self.pending = None;
    }

    pub fn to_normal(&mut self) {
        self.set_mode(InputMode::Normal);
    }

    pub fn to_insert(&mut self) {
        self.set_mode(InputMode::Insert);
    }

    pub fn to_search(&mut self) {
        self.set_mode(InputMode::Search);
    }

    pub fn to_confirm(&mut self) {
        self.set_mode(InputMode::Confirm);
    }

    pub fn to_tags(&mut self) {
        self.set_mode(InputMode::Tags);
    }

    /// Insert character at cursor
    pub fn insert_char(&mut self, c: char) {
        let at = byte_offset(&self.buffer, self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = byte_offset(&self.buffer, self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.len() {
            let at = byte_offset(&self.buffer, self.cursor);
            self.buffer.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn get_buffer(&self) -> &str {
        &self.buffer
    }

    /// Set buffer contents, cursor at the end
    pub fn set_buffer(&mut self, content: &str) {
        self.buffer = content.to_string();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_transitions() {
        let mut state = ModeState::new();
        assert_eq!(state.mode, InputMode::Normal);

        state.to_insert();
        assert_eq!(state.mode, InputMode::Insert);

        state.to_search();
        assert_eq!(state.mode, InputMode::Search);

        state.to_normal();
        assert_eq!(state.mode, InputMode::Normal);
    }

    #[test]
    fn test_mode_switch_clears_buffer() {
        let mut state = ModeState::new();
        state.to_search();
        state.insert_char('x');
        state.to_normal();
        assert_eq!(state.get_buffer(), "");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_text_input() {
        let mut state = ModeState::new();
        state.to_search();

        for c in "hello".chars() {
            state.insert_char(c);
        }

        assert_eq!(state.get_buffer(), "hello");
        assert_eq!(state.cursor, 5);

        state.delete_char();
        assert_eq!(state.get_buffer(), "hell");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = ModeState::new();
        state.set_buffer("café");

        state.cursor_left();
        state.insert_char('x');
        assert_eq!(state.get_buffer(), "cafxé");

        state.delete_char_forward();
        assert_eq!(state.get_buffer(), "cafx");
    }

    #[test]
    fn test_cursor_movement() {
        let mut state = ModeState::new();
        state.set_buffer("hello");

        state.cursor_home();
        assert_eq!(state.cursor, 0);

        state.cursor_end();
        assert_eq!(state.cursor, 5);

        state.cursor_left();
        assert_eq!(state.cursor, 4);

        state.cursor_right();
        assert_eq!(state.cursor, 5);
    }
}
