//! Renderer
//!
//! Main rendering logic for the application.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
    Frame,
};

use super::components::{
    ConfirmDialog, CredentialFormWidget, CredentialItem, CredentialList, DetailState, DetailView,
    EmptyState, ErrorBlock, HelpBar, ListViewState, MessageType, StatusLine, TagDropdown,
};
use crate::api::Credential;
use crate::input::InputMode;
use crate::ui::components::CredentialForm;
use crate::vault::TagSelection;

/// Active tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Credentials,
    Add,
}

impl View {
    pub fn index(&self) -> usize {
        match self {
            Self::Credentials => 0,
            Self::Add => 1,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Credentials => Self::Add,
            Self::Add => Self::Credentials,
        }
    }
}

pub struct TagDropdownView<'a> {
    pub options: &'a [String],
    pub search: &'a str,
    pub highlighted: usize,
    pub area: Rect,
}

pub struct UiState<'a> {
    pub view: View,
    pub mode: InputMode,
    pub items: &'a [CredentialItem],
    pub list_state: &'a mut ListViewState,
    pub total: usize,
    pub selected: Option<&'a Credential>,
    pub detail_state: &'a DetailState,
    pub search: &'a str,
    pub errors: &'a [String],
    pub loading: bool,
    pub online: Option<bool>,
    pub message: Option<(&'a str, MessageType)>,
    pub confirm_message: Option<&'a str>,
    pub form: &'a CredentialForm,
    pub tag_selection: &'a TagSelection,
    pub tag_dropdown: Option<TagDropdownView<'a>>,
}

/// Tabs, one content row, status line and help bar
const MIN_HEIGHT: u16 = 6;

pub struct Renderer;

impl Renderer {
    pub fn hex_color(rgb: u32) -> Color {
        Color::Rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    pub fn render(frame: &mut Frame, state: &mut UiState) {
        let size = frame.area();
        if size.height < MIN_HEIGHT {
            let notice = Paragraph::new("Terminal too small").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(notice, size);
            return;
        }
        let chunks = create_main_layout(size);

        render_tabs(frame, chunks[0], state.view);
        render_content(frame, chunks[1], state);
        render_status_line(frame, chunks[2], state);
        frame.render_widget(HelpBar::for_mode(state.mode), chunks[3]);
        render_overlays(frame, size, state);
    }
}

fn create_main_layout(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size)
}

fn render_tabs(frame: &mut Frame, area: Rect, view: View) {
    let tabs = Tabs::new(vec![Line::from(" View Credentials "), Line::from(" Add Credential ")])
        .select(view.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .divider("│");
    frame.render_widget(tabs, area);
}

/// Splits off a block for the error list above `area`, if there are errors
fn split_errors(frame: &mut Frame, area: Rect, errors: &[String]) -> Rect {
    let height = ErrorBlock::height(errors);
    if height == 0 {
        return area;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(height), Constraint::Min(0)])
        .split(area);
    frame.render_widget(ErrorBlock::new(errors), chunks[0]);
    chunks[1]
}

fn render_content(frame: &mut Frame, area: Rect, state: &mut UiState) {
    let area = split_errors(frame, area, state.errors);
    match state.view {
        View::Credentials => render_credentials(frame, area, state),
        View::Add => render_form(frame, area, state),
    }
}

fn render_credentials(frame: &mut Frame, area: Rect, state: &mut UiState) {
    if state.total == 0 {
        let (message, hint) = if state.loading {
            ("Loading credentials…", None)
        } else {
            ("No credentials", Some("Press 'n' to add one"))
        };
        let mut empty = EmptyState::new(message);
        if let Some(hint) = hint {
            empty = empty.hint(hint);
        }
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let title = if state.search.trim().is_empty() {
        format!(" Credentials ({}) ", state.total)
    } else {
        format!(" Credentials ({}/{}) /{} ", state.items.len(), state.total, state.search)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta));

    if state.items.is_empty() {
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        frame.render_widget(EmptyState::new("No matches"), inner);
    } else {
        let list = CredentialList::new(state.items).block(block);
        frame.render_stateful_widget(list, chunks[0], &mut *state.list_state);
    }

    match state.selected {
        Some(cred) => frame.render_widget(DetailView::new(cred, state.detail_state), chunks[1]),
        None => frame.render_widget(EmptyState::new("Select a credential"), chunks[1]),
    }
}

fn render_form(frame: &mut Frame, area: Rect, state: &UiState) {
    let widget = CredentialFormWidget::new(state.form, state.tag_selection).loading(state.loading);
    frame.render_widget(widget, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &UiState) {
    let mut status = StatusLine::new(state.mode)
        .loading(state.loading)
        .online(state.online);

    if let Some((msg, msg_type)) = state.message {
        status = status.message(msg, msg_type);
    }
    if !state.search.is_empty() {
        status = status.search(state.search);
    }
    if state.view == View::Credentials {
        if let Some(selected) = state.list_state.selected() {
            status = status.item_count(selected, state.list_state.total);
        }
    }

    frame.render_widget(status, area);
}

fn render_overlays(frame: &mut Frame, area: Rect, state: &UiState) {
    if let Some(dropdown) = &state.tag_dropdown {
        let widget = TagDropdown::new(dropdown.options, state.tag_selection, dropdown.search, dropdown.highlighted);
        frame.render_widget(widget, dropdown.area);
    }

    if state.mode != InputMode::Confirm {
        return;
    }
    if let Some(msg) = state.confirm_message {
        frame.render_widget(ConfirmDialog::new(" Confirm ", msg), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_toggle() {
        assert_eq!(View::Credentials.toggled(), View::Add);
        assert_eq!(View::Add.toggled(), View::Credentials);
        assert_eq!(View::Add.index(), 1);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(Renderer::hex_color(0x4C566A), Color::Rgb(0x4C, 0x56, 0x6A));
    }
}
