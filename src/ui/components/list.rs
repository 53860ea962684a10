//! List View Component
//!
//! Displays credentials in a scrollable list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::api::Credential;
use crate::ui::renderer::Renderer;

#[derive(Debug, Clone)]
pub struct CredentialItem {
    pub app: String,
    pub username: String,
    pub tags: Vec<String>,
}

impl From<&Credential> for CredentialItem {
    fn from(cred: &Credential) -> Self {
        let app = if cred.app.is_empty() { "(unnamed)".to_string() } else { cred.app.clone() };
        Self {
            app,
            username: cred.username.clone(),
            tags: cred.tags().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListViewState {
    pub selected: Option<usize>,
    pub total: usize,
    list_state: ListState,
}

impl ListViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
        self.list_state.select(index);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.select(compute_selection_after_total_change(self.selected, total));
    }

    pub fn move_up(&mut self) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.unwrap_or(0).saturating_sub(1);
        self.select(Some(new_index));
    }

    pub fn move_down(&mut self) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.map_or(0, |i| (i + 1).min(self.total - 1));
        self.select(Some(new_index));
    }

    pub fn move_to_top(&mut self) {
        if self.total > 0 {
            self.select(Some(0));
        }
    }

    pub fn move_to_bottom(&mut self) {
        if self.total > 0 {
            self.select(Some(self.total - 1));
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.unwrap_or(0).saturating_sub(page_size);
        self.select(Some(new_index));
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.total == 0 {
            return;
        }
        let new_index = self.selected.map_or(0, |i| (i + page_size).min(self.total - 1));
        self.select(Some(new_index));
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }
}

fn compute_selection_after_total_change(selected: Option<usize>, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    match selected {
        Some(sel) if sel >= total => Some(total - 1),
        Some(sel) => Some(sel),
        None => Some(0),
    }
}

pub struct CredentialList<'a> {
    items: &'a [CredentialItem],
    block: Option<Block<'a>>,
    highlight_style: Style,
}

impl<'a> CredentialList<'a> {
    pub fn new(items: &'a [CredentialItem]) -> Self {
        Self {
            items,
            block: None,
            highlight_style: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

fn build_selection_symbol(is_selected: bool) -> Span<'static> {
    if is_selected {
        Span::styled("▌ ", Style::default().fg(Color::Magenta).bg(Color::DarkGray))
    } else {
        Span::raw("  ")
    }
}

fn build_item_spans(item: &CredentialItem, is_selected: bool, highlight_style: Style) -> Vec<Span<'_>> {
    let base_style = if is_selected { highlight_style } else { Style::default() };
    let mut spans = vec![
        build_selection_symbol(is_selected),
        Span::styled(item.app.as_str(), base_style.fg(Color::White)),
        Span::styled(
            format!(" ({})", item.username),
            base_style.fg(Renderer::hex_color(0x4C566A)),
        ),
    ];
    spans.extend(
        item.tags
            .iter()
            .map(|tag| Span::styled(format!(" #{}", tag), base_style.fg(Color::Magenta))),
    );
    spans
}

fn build_list_item(
    item: &CredentialItem,
    index: usize,
    selected: Option<usize>,
    highlight_style: Style,
) -> ListItem<'_> {
    let is_selected = Some(index) == selected;
    let spans = build_item_spans(item, is_selected, highlight_style);
    let mut list_item = ListItem::new(Line::from(spans));

    if is_selected {
        list_item = list_item.style(highlight_style);
    }

    list_item
}

impl StatefulWidget for CredentialList<'_> {
    type State = ListViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let selected = state.selected();

        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| build_list_item(item, i, selected, self.highlight_style))
            .collect();

        let list = List::new(items);
        let list = match self.block {
            Some(block) => list.block(block),
            None => list,
        };

        StatefulWidget::render(list, area, buf, state.list_state_mut());
    }
}

pub struct EmptyState<'a> {
    message: &'a str,
    hint: Option<&'a str>,
}

impl<'a> EmptyState<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message, hint: None }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }
}

fn center_x(area: &Rect, text_len: usize) -> u16 {
    area.x + (area.width.saturating_sub(text_len as u16)) / 2
}

impl Widget for EmptyState<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let center_y = area.y + area.height / 2;
        let msg_x = center_x(&area, self.message.len());
        buf.set_string(msg_x, center_y, self.message, Style::default().fg(Color::DarkGray));
        render_optional_hint(buf, &area, center_y, self.hint);
    }
}

fn render_optional_hint(buf: &mut Buffer, area: &Rect, center_y: u16, hint: Option<&str>) {
    let Some(hint) = hint else { return };
    if center_y + 1 >= area.y + area.height {
        return;
    }
    let hint_x = center_x(area, hint.len());
    let style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
    buf.set_string(hint_x, center_y + 1, hint, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListViewState::new();
        state.set_total(5);

        assert_eq!(state.selected(), Some(0));

        state.move_down();
        assert_eq!(state.selected(), Some(1));

        state.move_up();
        assert_eq!(state.selected(), Some(0));

        state.move_to_bottom();
        assert_eq!(state.selected(), Some(4));

        state.move_to_top();
        assert_eq!(state.selected(), Some(0));

        state.page_down(3);
        assert_eq!(state.selected(), Some(3));
    }

    #[test]
    fn test_list_state_empty() {
        let mut state = ListViewState::new();
        state.set_total(0);

        state.move_down();
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut state = ListViewState::new();
        state.set_total(5);
        state.move_to_bottom();

        state.set_total(2);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn test_empty_state_zero_height() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 3));
        EmptyState::new("No credentials").hint("Press 'n'").render(Rect::new(0, 3, 20, 0), &mut buf);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 20, 3)));
    }

    #[test]
    fn test_item_from_credential() {
        let cred = Credential::new("", "alice", "p").with_tags(["work"]);
        let item = CredentialItem::from(&cred);
        assert_eq!(item.app, "(unnamed)");
        assert_eq!(item.tags, vec!["work"]);
    }
}
