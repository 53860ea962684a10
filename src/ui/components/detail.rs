//! Detail View Component
//!
//! Displays one credential with its password toggle and copy indicator.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::api::Credential;

const MASK: &str = "••••••••••••";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopiedField {
    Username,
    Password,
}

impl CopiedField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }
}

/// "Just copied" marker. Every copy schedules its own clear, so the deadline
/// of an earlier copy also clears the indicator of a later one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopiedIndicator {
    field: Option<CopiedField>,
    deadlines: Vec<Instant>,
}

impl CopiedIndicator {
    pub fn mark(&mut self, field: CopiedField, copied_at: Instant, hold: Duration) {
        self.field = Some(field);
        self.deadlines.push(copied_at + hold);
    }

    pub fn expire(&mut self, now: Instant) {
        let pending = self.deadlines.len();
        self.deadlines.retain(|deadline| *deadline > now);
        if self.deadlines.len() < pending {
            self.field = None;
        }
    }

    pub fn field(&self) -> Option<CopiedField> {
        self.field
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// UI-only state of the detail panel
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub password_visible: bool,
    pub copied: CopiedIndicator,
}

impl DetailState {
    pub fn toggle_password(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn mark_copied(&mut self, field: CopiedField, now: Instant, hold: Duration) {
        self.copied.mark(field, now, hold);
    }

    pub fn expire(&mut self, now: Instant) {
        self.copied.expire(now);
    }

    pub fn copied_field(&self) -> Option<CopiedField> {
        self.copied.field()
    }

    /// Selection moved to another record
    pub fn reset(&mut self) {
        self.password_visible = false;
        self.copied.clear();
    }
}

pub fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Detail view widget
pub struct DetailView<'a> {
    credential: &'a Credential,
    state: &'a DetailState,
}

impl<'a> DetailView<'a> {
    pub fn new(credential: &'a Credential, state: &'a DetailState) -> Self {
        Self { credential, state }
    }
}

impl Widget for DetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cred = self.credential;
        let block = Block::default()
            .title(format!(" {} ", cred.app))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(field) = self.state.copied_field() {
            render_copied_badge(buf, area, field);
        }

        let mut y = inner.y;
        let copied = self.state.copied_field();

        render_field(buf, inner, &mut y, "Username", &[
            Span::styled(&cred.username, Style::default().fg(Color::White)),
            copy_hint(copied == Some(CopiedField::Username), "u"),
        ]);

        let password = if self.state.password_visible {
            cred.password.clone()
        } else {
            MASK.to_string()
        };
        let toggle = if self.state.password_visible { " [s] hide" } else { " [s] show" };
        render_field(buf, inner, &mut y, "Password", &[
            Span::styled(password, Style::default().fg(Color::Yellow)),
            Span::styled(toggle, Style::default().fg(Color::DarkGray)),
            copy_hint(copied == Some(CopiedField::Password), "yy"),
        ]);

        if !cred.tags().is_empty() {
            let tag_spans: Vec<Span> = cred
                .tags()
                .iter()
                .flat_map(|tag| {
                    [
                        Span::styled(format!("#{}", capitalize(tag)), Style::default().fg(Color::Magenta)),
                        Span::raw(" "),
                    ]
                })
                .collect();
            render_field(buf, inner, &mut y, "Tags", &tag_spans);
        }

        y += 1;

        if let Some(note) = cred.note() {
            if y < inner.y + inner.height {
                buf.set_string(inner.x, y, "Notes:", Style::default().fg(Color::DarkGray));
                y += 1;
                let note_area = Rect::new(inner.x, y, inner.width, (inner.y + inner.height).saturating_sub(y));
                Paragraph::new(note)
                    .style(Style::default().fg(Color::Gray))
                    .wrap(Wrap { trim: true })
                    .render(note_area, buf);
            }
        }

        render_timestamps(buf, inner, y, cred);
    }
}

fn copy_hint(copied: bool, key: &'static str) -> Span<'static> {
    if copied {
        Span::styled(" ✓ copied", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(format!(" [{}] copy", key), Style::default().fg(Color::DarkGray))
    }
}

fn render_copied_badge(buf: &mut Buffer, area: Rect, field: CopiedField) {
    let badge = format!(" ✓ {} copied! ", field.label());
    let width = badge.chars().count() as u16;
    if area.width <= width + 2 {
        return;
    }
    let x = area.x + area.width - width - 2;
    buf.set_string(x, area.y, badge, Style::default().fg(Color::Black).bg(Color::Green));
}

fn render_field(buf: &mut Buffer, inner: Rect, y: &mut u16, label: &str, value: &[Span]) {
    if *y >= inner.y + inner.height {
        return;
    }
    buf.set_string(inner.x, *y, format!("{}:", label), Style::default().fg(Color::DarkGray));

    let value_x = inner.x + 12;
    let width = inner.width.saturating_sub(12);
    let line = Line::from(value.to_vec());
    buf.set_line(value_x, *y, &line, width);

    *y += 1;
}

fn render_timestamps(buf: &mut Buffer, inner: Rect, content_end: u16, cred: &Credential) {
    let lines: Vec<String> = [("Created", cred.created_at), ("Updated", cred.updated_at)]
        .into_iter()
        .filter_map(|(label, ts)| ts.map(|t| format!("{}: {}", label, t.format("%Y-%m-%d %H:%M"))))
        .collect();

    let footer_y = (inner.y + inner.height).saturating_sub(lines.len() as u16);
    if footer_y <= content_end {
        return;
    }
    for (i, line) in lines.iter().enumerate() {
        buf.set_string(inner.x, footer_y + i as u16, line, Style::default().fg(Color::DarkGray));
    }
}
