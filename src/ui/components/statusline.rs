//! Status Line Component
//!
//! Displays mode indicator, messages, and connection info.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::input::InputMode;

/// Message type for status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Status line widget
pub struct StatusLine<'a> {
    mode: InputMode,
    search: Option<&'a str>,
    message: Option<(&'a str, MessageType)>,
    item_count: Option<(usize, usize)>,
    loading: bool,
    online: Option<bool>,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            search: None,
            message: None,
            item_count: None,
            loading: false,
            online: None,
        }
    }

    pub fn search(mut self, term: &'a str) -> Self {
        self.search = Some(term);
        self
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    pub fn item_count(mut self, selected: usize, total: usize) -> Self {
        self.item_count = Some((selected, total));
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn online(mut self, online: Option<bool>) -> Self {
        self.online = online;
        self
    }
}

fn mode_style(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => Color::Blue,
        InputMode::Insert => Color::Green,
        InputMode::Search => Color::Magenta,
        InputMode::Confirm => Color::Red,
        InputMode::Tags => Color::Cyan,
    };
    Style::default().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD)
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let mut x = area.x;

        let mode_text = format!(" {} ", self.mode.indicator());
        buf.set_string(x, area.y, &mode_text, mode_style(self.mode));
        x += mode_text.len() as u16 + 1;

        if let Some((msg, msg_type)) = self.message {
            buf.set_string(x, area.y, msg, Style::default().fg(msg_type.color()).bg(Color::DarkGray));
        } else if let Some(term) = self.search {
            let text = format!("/{}", term);
            buf.set_string(x, area.y, &text, Style::default().fg(Color::White).bg(Color::DarkGray));
        }

        let mut right_parts: Vec<String> = Vec::new();
        if self.loading {
            right_parts.push("loading…".to_string());
        }
        if let Some((selected, total)) = self.item_count {
            right_parts.push(format!("{}/{}", selected + 1, total));
        }
        match self.online {
            Some(true) => right_parts.push("● api".to_string()),
            Some(false) => right_parts.push("○ api offline".to_string()),
            None => {}
        }

        let right_text = right_parts.join("  ");
        let right_x = area.x + area.width.saturating_sub(right_text.chars().count() as u16 + 1);
        buf.set_string(right_x, area.y, &right_text, Style::default().fg(Color::Gray).bg(Color::DarkGray));
    }
}

/// Help bar widget
pub struct HelpBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
}

impl HelpBar<'_> {
    pub fn for_mode(mode: InputMode) -> Self {
        let hints = match mode {
            InputMode::Normal => vec![
                ("j/k", "navigate"),
                ("Tab/1/2", "switch tab"),
                ("n", "add"),
                ("yy", "copy pwd"),
                ("u", "copy user"),
                ("s", "show pwd"),
                ("dd", "delete"),
                ("/", "search"),
                ("r", "refresh"),
                ("q", "quit"),
            ],
            InputMode::Insert => vec![
                ("Tab", "next field"),
                ("Enter", "submit"),
                ("Esc", "back to list"),
                ("C-u", "clear"),
            ],
            InputMode::Search => vec![
                ("Enter", "keep"),
                ("Esc", "clear"),
            ],
            InputMode::Tags => vec![
                ("Enter", "toggle"),
                ("Esc", "close"),
            ],
            InputMode::Confirm => vec![
                ("y", "yes"),
                ("n", "no"),
            ],
        };
        Self { hints }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
        }
        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_height_row_below_buffer() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 5));
        let below = Rect::new(0, 5, 50, 0);

        HelpBar::for_mode(InputMode::Normal).render(below, &mut buf);
        StatusLine::new(InputMode::Normal).render(below, &mut buf);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 50, 5)));
    }
}
