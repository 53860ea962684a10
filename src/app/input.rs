use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::input::keymap::{confirm_action, normal_mode_action, text_input_action, Action};
use crate::input::modes::InputMode;
use crate::ui::components::CredentialForm;
use crate::ui::renderer::View;
use crate::vault::known_tags;

use super::App;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        match self.mode_state.mode {
            InputMode::Normal => {
                let (action, pending) = normal_mode_action(key, self.mode_state.pending);
                self.mode_state.pending = pending;
                self.execute_action(action);
            }
            InputMode::Insert => self.handle_form_key(key),
            InputMode::Search => self.handle_search_key(key),
            InputMode::Tags => self.handle_tags_key(key),
            InputMode::Confirm => self.execute_action(confirm_action(key)),
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(area) = self.tag_dropdown_area() else { return };

        if !area.contains(Position::new(mouse.column, mouse.row)) {
            self.close_tag_picker();
        }
    }

    /// Apply a line-editing action to the mode buffer. Returns the action
    /// back when it is not an edit.
    fn edit_buffer(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::InsertChar(c) => self.mode_state.insert_char(c),
            Action::DeleteChar => self.mode_state.delete_char(),
            Action::DeleteCharForward => self.mode_state.delete_char_forward(),
            Action::CursorLeft => self.mode_state.cursor_left(),
            Action::CursorRight => self.mode_state.cursor_right(),
            Action::CursorHome => self.mode_state.cursor_home(),
            Action::CursorEnd => self.mode_state.cursor_end(),
            Action::ClearLine => self.mode_state.clear_buffer(),
            other => return Some(other),
        }
        None
    }

    /// Search filters live on every edit
    fn handle_search_key(&mut self, key: KeyEvent) {
        match self.edit_buffer(text_input_action(key)) {
            None => {
                let term = self.mode_state.get_buffer().to_string();
                self.set_search(&term);
            }
            Some(Action::Submit) => self.mode_state.to_normal(),
            Some(Action::Cancel) => {
                self.set_search("");
                self.mode_state.to_normal();
            }
            Some(_) => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.show_view(View::Credentials),
            (KeyCode::Enter, _) if self.form.is_tags_field() => self.open_tag_picker(),
            (KeyCode::Enter, _) => self.submit_form(),
            (code, mods) => dispatch_form_key(&mut self.form, code, mods),
        }
    }

    fn open_tag_picker(&mut self) {
        self.tag_picker.open();
        self.mode_state.to_tags();
    }

    fn close_tag_picker(&mut self) {
        self.tag_picker.close();
        self.mode_state.to_insert();
    }

    fn handle_tags_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => return self.close_tag_picker(),
            KeyCode::Up => return self.tag_picker.move_up(),
            KeyCode::Down => {
                let count = self.tag_options().len();
                return self.tag_picker.move_down(count);
            }
            KeyCode::Enter => return self.toggle_highlighted_tag(),
            _ => {}
        }

        if self.edit_buffer(text_input_action(key)).is_none() {
            let count = self.tag_options().len();
            self.tag_picker.clamp(count);
        }
    }

    /// Enter in the dropdown. A typed term that is not already a known tag
    /// becomes a new tag; otherwise the highlighted option is toggled.
    fn toggle_highlighted_tag(&mut self) {
        let term = self.mode_state.get_buffer().trim().to_string();
        let known = known_tags(&self.credentials, &self.tag_selection);
        let is_new = !term.is_empty() && !known.iter().any(|t| t.to_lowercase() == term.to_lowercase());

        if is_new {
            self.tag_selection.toggle(&term);
            self.mode_state.clear_buffer();
            self.tag_picker.clamp(self.tag_options().len());
            return;
        }

        let options = self.tag_options();
        if let Some(tag) = options.get(self.tag_picker.highlighted) {
            self.tag_selection.toggle(tag);
        }
    }
}

fn dispatch_form_key(form: &mut CredentialForm, code: KeyCode, mods: KeyModifiers) {
    match (code, mods) {
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => form.next_field(),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => form.prev_field(),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => form.toggle_password_visibility(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => form.clear_field(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => form.insert_char(c),
        (KeyCode::Backspace, _) => form.delete_char(),
        (KeyCode::Left, _) => form.cursor_left(),
        (KeyCode::Right, _) => form.cursor_right(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiRequest, Credential};
    use crate::app::tests::loaded_app;
    use crate::ui::components::TagPickerState;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn open_picker(app: &mut App) {
        app.handle_key_event(key(KeyCode::Char('n')));
        app.handle_key_event(key(KeyCode::BackTab));
        assert!(app.form.is_tags_field());
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.mode_state.mode, InputMode::Tags);
    }

    #[test]
    fn test_live_search() {
        let mut app = loaded_app();
        app.handle_key_event(key(KeyCode::Char('/')));
        type_str(&mut app, "sla");
        assert_eq!(app.search, "sla");
        assert_eq!(app.items.len(), 1);

        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.mode_state.mode, InputMode::Normal);
        assert_eq!(app.items.len(), 1);

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.items.len(), 2);
    }

    #[test]
    fn test_search_cancel_clears() {
        let mut app = loaded_app();
        app.handle_key_event(key(KeyCode::Char('/')));
        type_str(&mut app, "zzz");
        assert!(app.items.is_empty());

        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.search.is_empty());
        assert_eq!(app.items.len(), 2);
    }

    #[test]
    fn test_form_typing_and_submit() {
        let mut app = loaded_app();
        app.handle_key_event(key(KeyCode::Char('n')));
        assert_eq!(app.view, View::Add);
        assert_eq!(app.mode_state.mode, InputMode::Insert);

        type_str(&mut app, "password3");
        app.handle_key_event(key(KeyCode::Tab));
        type_str(&mut app, "GitHub");
        app.handle_key_event(key(KeyCode::Tab));
        type_str(&mut app, "carol");
        app.handle_key_event(key(KeyCode::Enter));

        match app.take_requests().as_slice() {
            [ApiRequest::Submit(cred)] => {
                assert_eq!(cred.app, "GitHub");
                assert_eq!(cred.password, "password3");
            }
            other => panic!("unexpected requests: {other:?}"),
        }
    }

    #[test]
    fn test_esc_leaves_form() {
        let mut app = loaded_app();
        app.handle_key_event(key(KeyCode::Char('n')));
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.view, View::Credentials);
        assert_eq!(app.mode_state.mode, InputMode::Normal);
    }

    #[test]
    fn test_tag_picker_toggle_and_new_tag() {
        let mut app = loaded_app();
        open_picker(&mut app);

        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.tag_selection.is_selected("work"));

        type_str(&mut app, "personal");
        assert!(app.tag_options().is_empty());
        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.tag_selection.is_selected("personal"));
        assert!(app.mode_state.get_buffer().is_empty());

        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.tag_picker.open);
        assert_eq!(app.mode_state.mode, InputMode::Insert);
    }

    #[test]
    fn test_new_tag_that_prefixes_existing_tag() {
        let mut app = loaded_app();
        app.credentials = vec![Credential::new("Slack", "bob", "password2").with_tags(["workshop"])];
        app.refilter();
        open_picker(&mut app);

        type_str(&mut app, "work");
        assert_eq!(app.tag_options(), vec!["workshop".to_string()]);
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.tag_selection.as_slice(), ["work".to_string()]);
        assert!(!app.tag_selection.is_selected("workshop"));
    }

    #[test]
    fn test_exact_term_toggles_existing_tag() {
        let mut app = loaded_app();
        open_picker(&mut app);

        type_str(&mut app, "WORK");
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.tag_selection.as_slice(), ["work".to_string()]);

        app.handle_key_event(key(KeyCode::Enter));
        assert!(app.tag_selection.is_empty());
    }

    #[test]
    fn test_dropdown_click_inside_keeps_open() {
        let mut app = loaded_app();
        open_picker(&mut app);

        let area = TagPickerState::area(app.terminal_size);
        app.handle_mouse_event(click(area.x + 1, area.y + 1));
        assert!(app.tag_picker.open);
        assert_eq!(app.mode_state.mode, InputMode::Tags);
    }

    #[test]
    fn test_dropdown_click_outside_closes() {
        let mut app = loaded_app();
        open_picker(&mut app);

        app.handle_mouse_event(click(0, 0));
        assert!(!app.tag_picker.open);
        assert_eq!(app.mode_state.mode, InputMode::Insert);
    }

    #[test]
    fn test_click_ignored_when_closed() {
        let mut app = loaded_app();
        app.handle_mouse_event(click(0, 0));
        assert_eq!(app.mode_state.mode, InputMode::Normal);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = loaded_app();
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        app.handle_key_event(release);
        assert!(!app.should_quit);

        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_pending_keys() {
        let mut app = loaded_app();
        app.handle_key_event(key(KeyCode::Char('G')));
        assert_eq!(app.list_state.selected(), Some(1));
        app.handle_key_event(key(KeyCode::Char('g')));
        app.handle_key_event(key(KeyCode::Char('g')));
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
