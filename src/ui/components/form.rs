//! Credential Form Component
//!
//! Multi-field form for adding a credential.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use crate::api::Credential;
use crate::input::modes::byte_offset;
use crate::vault::TagSelection;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub required: bool,
    pub masked: bool,
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Password,
    /// Opens the tag dropdown instead of taking text
    Tags,
}

impl FormField {
    pub fn text(label: &'static str, placeholder: &'static str, required: bool) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
            required,
            masked: false,
            field_type: FieldType::Text,
        }
    }

    pub fn password(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
            required: true,
            masked: true,
            field_type: FieldType::Password,
        }
    }

    pub fn tags(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
            required: false,
            masked: false,
            field_type: FieldType::Tags,
        }
    }

    fn accepts_text(&self) -> bool {
        self.field_type != FieldType::Tags
    }
}

const PASSWORD: usize = 0;
const APP: usize = 1;
const USERNAME: usize = 2;
const DESCRIPTION: usize = 3;

/// Credential form state. Cursor counts characters.
#[derive(Debug, Clone)]
pub struct CredentialForm {
    pub fields: Vec<FormField>,
    pub active_field: usize,
    pub cursor: usize,
    pub show_password: bool,
}

impl Default for CredentialForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialForm {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FormField::password("Password", "Enter your password"),
                FormField::text("App", "Enter the app name", true),
                FormField::text("Username/Email", "Enter your username or email", true),
                FormField::text("Description", "Enter any additional information", false),
                FormField::tags("Tags", "Enter to choose tags"),
            ],
            active_field: 0,
            cursor: 0,
            show_password: false,
        }
    }

    pub fn active_field(&self) -> &FormField {
        &self.fields[self.active_field]
    }

    pub fn is_tags_field(&self) -> bool {
        self.active_field().field_type == FieldType::Tags
    }

    fn active_len(&self) -> usize {
        self.active_field().value.chars().count()
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.fields.len();
        self.cursor = self.active_len();
    }

    pub fn prev_field(&mut self) {
        if self.active_field == 0 {
            self.active_field = self.fields.len() - 1;
        } else {
            self.active_field -= 1;
        }
        self.cursor = self.active_len();
    }

    pub fn insert_char(&mut self, c: char) {
        let field = &mut self.fields[self.active_field];
        if field.accepts_text() {
            let at = byte_offset(&field.value, self.cursor);
            field.value.insert(at, c);
            self.cursor += 1;
        }
    }

    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.active_field];
        if self.cursor > 0 && field.accepts_text() {
            self.cursor -= 1;
            let at = byte_offset(&field.value, self.cursor);
            field.value.remove(at);
        }
    }

    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.active_field];
        if field.accepts_text() {
            field.value.clear();
            self.cursor = 0;
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.active_len() {
            self.cursor += 1;
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    #[cfg(test)]
    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.to_string();
        }
        if index == self.active_field {
            self.cursor = self.active_len();
        }
    }

    /// Assemble a record from the fields and the separately tracked tags
    pub fn build_credential(&self, tags: &TagSelection) -> Credential {
        let description = self.fields[DESCRIPTION].value.trim();
        Credential {
            description: (!description.is_empty()).then(|| description.to_string()),
            tags: tags.to_tags(),
            ..Credential::new(
                self.fields[APP].value.trim(),
                self.fields[USERNAME].value.trim(),
                self.fields[PASSWORD].value.clone(),
            )
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

/// Credential form widget
pub struct CredentialFormWidget<'a> {
    form: &'a CredentialForm,
    tags: &'a TagSelection,
    loading: bool,
}

impl<'a> CredentialFormWidget<'a> {
    pub fn new(form: &'a CredentialForm, tags: &'a TagSelection) -> Self {
        Self { form, tags, loading: false }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn display_value(&self, field: &FormField, width: usize) -> (String, Style) {
        match field.field_type {
            FieldType::Tags if self.tags.is_empty() => {
                (field.placeholder.to_string(), Style::default().fg(Color::DarkGray))
            }
            FieldType::Tags => {
                let joined = self.tags.as_slice().iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ");
                (joined, Style::default().fg(Color::Magenta))
            }
            _ if field.value.is_empty() => {
                (field.placeholder.to_string(), Style::default().fg(Color::DarkGray))
            }
            _ if field.masked && !self.form.show_password => {
                ("*".repeat(field.value.chars().count().min(width)), Style::default().fg(Color::Green))
            }
            _ => (field.value.clone(), Style::default().fg(Color::White)),
        }
    }
}

impl Widget for CredentialFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let form_width = 70u16.min(area.width.saturating_sub(4));
        let form_height = 14u16.min(area.height);
        let form_x = area.x + (area.width.saturating_sub(form_width)) / 2;
        let form_y = area.y + (area.height.saturating_sub(form_height)) / 2;
        let form_area = Rect::new(form_x, form_y, form_width, form_height);

        Clear.render(form_area, buf);

        let block = Block::default()
            .title(" Add New Credential ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(form_area);
        block.render(form_area, buf);
        if inner.height == 0 {
            return;
        }

        let label_width = 18u16;
        let value_x = inner.x + label_width;
        let value_width = inner.width.saturating_sub(label_width + 1);
        let mut y = inner.y;

        for (i, field) in self.form.fields.iter().enumerate() {
            if y >= inner.y + inner.height.saturating_sub(1) {
                break;
            }
            let is_active = i == self.form.active_field;

            let label = if field.required {
                format!("{}*:", field.label)
            } else {
                format!("{}:", field.label)
            };
            let label_style = if is_active {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            buf.set_string(inner.x, y, &label, label_style);

            let bg = if is_active { Color::DarkGray } else { Color::Black };
            for x in value_x..value_x + value_width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_style(Style::default().bg(bg));
                }
            }

            let (display, style) = self.display_value(field, value_width as usize);
            buf.set_stringn(value_x, y, &display, value_width as usize, style.bg(bg));

            if is_active && field.accepts_text() {
                let cursor_x = value_x + self.form.cursor as u16;
                if cursor_x < value_x + value_width {
                    if let Some(cell) = buf.cell_mut((cursor_x, y)) {
                        cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
                    }
                }
            }

            y += 2;
        }

        let help_y = inner.y + inner.height - 1;
        let submit = if self.loading {
            Span::styled("Saving…", Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            Span::styled("Enter", Style::default().fg(Color::Magenta))
        };
        let help_text = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Magenta)),
            Span::raw(" next  "),
            Span::styled("Shift+Tab", Style::default().fg(Color::Magenta)),
            Span::raw(" prev  "),
            submit,
            Span::raw(" submit  "),
            Span::styled("Esc", Style::default().fg(Color::Magenta)),
            Span::raw(" back  "),
            Span::styled("Ctrl+s", Style::default().fg(Color::Magenta)),
            Span::raw(" show pwd"),
        ]);
        buf.set_line(inner.x, help_y, &help_text, inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut CredentialForm, text: &str) {
        for c in text.chars() {
            form.insert_char(c);
        }
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = CredentialForm::new();
        form.prev_field();
        assert!(form.is_tags_field());
        form.next_field();
        assert_eq!(form.active_field, PASSWORD);
    }

    #[test]
    fn test_build_credential() {
        let mut form = CredentialForm::new();
        type_str(&mut form, "hunter22");
        form.next_field();
        type_str(&mut form, " Gmail ");
        form.next_field();
        type_str(&mut form, "a@b.com");

        let mut tags = TagSelection::new();
        tags.toggle("personal");

        let cred = form.build_credential(&tags);
        assert_eq!(cred.password, "hunter22");
        assert_eq!(cred.app, "Gmail");
        assert_eq!(cred.username, "a@b.com");
        assert_eq!(cred.description, None);
        assert_eq!(cred.tags, Some(vec!["personal".to_string()]));
        assert_eq!(cred.id, None);
    }

    #[test]
    fn test_tags_field_takes_no_text() {
        let mut form = CredentialForm::new();
        form.prev_field();
        form.insert_char('x');
        assert!(form.active_field().value.is_empty());
    }

    #[test]
    fn test_editing_and_clear() {
        let mut form = CredentialForm::new();
        type_str(&mut form, "abc");
        form.cursor_left();
        form.delete_char();
        assert_eq!(form.active_field().value, "ac");

        form.clear();
        assert!(form.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(form.active_field, PASSWORD);
    }
}
