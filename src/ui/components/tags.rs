//! Tag Dropdown
//!
//! Searchable tag picker shown over the add form.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::popup::centered_rect_fixed;
use crate::vault::TagSelection;

const DROPDOWN_WIDTH: u16 = 44;
const DROPDOWN_HEIGHT: u16 = 14;

#[derive(Debug, Clone, Default)]
pub struct TagPickerState {
    pub open: bool,
    pub highlighted: usize,
}

impl TagPickerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.highlighted = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.highlighted = 0;
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self, option_count: usize) {
        if option_count > 0 {
            self.highlighted = (self.highlighted + 1).min(option_count - 1);
        }
    }

    /// Keep the highlight inside the option list after it shrinks
    pub fn clamp(&mut self, option_count: usize) {
        self.highlighted = self.highlighted.min(option_count.saturating_sub(1));
    }

    /// Screen area the dropdown occupies inside `frame`
    pub fn area(frame: Rect) -> Rect {
        centered_rect_fixed(DROPDOWN_WIDTH, DROPDOWN_HEIGHT, frame)
    }
}

/// Known tags narrowed by a case-insensitive substring of `search`
pub fn filter_options(known: &[String], search: &str) -> Vec<String> {
    let needle = search.trim().to_lowercase();
    known
        .iter()
        .filter(|t| needle.is_empty() || t.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub struct TagDropdown<'a> {
    options: &'a [String],
    selection: &'a TagSelection,
    search: &'a str,
    highlighted: usize,
}

impl<'a> TagDropdown<'a> {
    pub fn new(options: &'a [String], selection: &'a TagSelection, search: &'a str, highlighted: usize) -> Self {
        Self { options, selection, search, highlighted }
    }
}

impl Widget for TagDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Tags ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 3 {
            return;
        }

        let search_line = Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.search, Style::default().fg(Color::White)),
            Span::styled(" ", Style::default().bg(Color::White)),
        ]);
        buf.set_line(inner.x, inner.y, &search_line, inner.width);

        let list_top = inner.y + 1;
        let rows = inner.height.saturating_sub(2) as usize;

        if self.options.is_empty() {
            let hint = if self.search.trim().is_empty() {
                "No tags yet. Type one and press Enter".to_string()
            } else {
                format!("Enter to add \"{}\"", self.search.trim())
            };
            buf.set_stringn(inner.x, list_top, hint, inner.width as usize, Style::default().fg(Color::DarkGray));
        }

        let skip = self.highlighted.saturating_sub(rows.saturating_sub(1));
        for (row, (i, tag)) in self.options.iter().enumerate().skip(skip).take(rows).enumerate() {
            let y = list_top + row as u16;
            let checked = if self.selection.is_selected(tag) { "[x] " } else { "[ ] " };
            let style = if i == self.highlighted {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(checked, style.fg(Color::Green)),
                Span::styled(tag.as_str(), style.fg(Color::Magenta)),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw(" toggle  "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw(" move  "),
            Span::styled("Esc", Style::default().fg(Color::Magenta)),
            Span::raw(" close"),
        ]);
        buf.set_line(inner.x, inner.y + inner.height - 1, &help, inner.width);
    }
}
