use std::time::Instant;

use tracing::{debug, info, warn};

use crate::api::{ApiEvent, ApiRequest, FetchOutcome};
use crate::input::keymap::Action;
use crate::ui::components::{CopiedField, ListViewState, MessageType};
use crate::ui::renderer::View;

use super::clipboard::copy_with_timeout;
use super::config::PendingAction;
use super::App;

impl App {
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.move_list(|ls| ls.move_up()),
            Action::MoveDown => self.move_list(|ls| ls.move_down()),
            Action::MoveToTop => self.move_list(|ls| ls.move_to_top()),
            Action::MoveToBottom => self.move_list(|ls| ls.move_to_bottom()),
            Action::HalfPageUp => self.page_move(|ls, h| ls.page_up(h / 2)),
            Action::HalfPageDown => self.page_move(|ls, h| ls.page_down(h / 2)),

            Action::NextTab => self.show_view(self.view.toggled()),
            Action::ShowAdd => self.show_view(View::Add),
            Action::ShowList => self.show_view(View::Credentials),

            Action::Delete => self.request_delete(),
            Action::Refresh => self.refresh(),

            Action::CopyPassword => self.copy_field(CopiedField::Password),
            Action::CopyUsername => self.copy_field(CopiedField::Username),
            Action::TogglePasswordVisibility => self.detail.toggle_password(),

            Action::EnterSearch => self.enter_search(),
            Action::ClearSearch => self.set_search(""),

            Action::Confirm => self.handle_confirm(),
            Action::Cancel => self.cancel_pending(),

            Action::Quit => self.should_quit = true,

            _ => {}
        }
    }

    fn move_list(&mut self, f: impl FnOnce(&mut ListViewState)) {
        let before = self.list_state.selected();
        f(&mut self.list_state);
        if self.list_state.selected() != before {
            self.detail.reset();
        }
    }

    fn page_move(&mut self, f: impl FnOnce(&mut ListViewState, usize)) {
        let visible = self.list_visible_height();
        self.move_list(|ls| f(ls, visible));
    }

    pub fn list_visible_height(&self) -> usize {
        (self.terminal_size.height as usize).saturating_sub(5)
    }

    pub fn show_view(&mut self, view: View) {
        debug!(?view, "switching tab");
        self.view = view;
        self.tag_picker.close();
        match view {
            View::Add => self.mode_state.to_insert(),
            View::Credentials => self.mode_state.to_normal(),
        }
    }

    fn enter_search(&mut self) {
        let current = self.search.clone();
        self.mode_state.to_search();
        self.mode_state.set_buffer(&current);
    }

    /// Re-run fetch-all unless a request is already in flight
    pub fn refresh(&mut self) {
        if self.loading {
            self.set_message("A request is already in progress", MessageType::Warning);
            return;
        }
        self.loading = true;
        self.request(ApiRequest::FetchAll);
        self.request(ApiRequest::Health);
        self.set_message("Refreshing…", MessageType::Info);
    }

    /// Validate the form and queue it for submission
    pub fn submit_form(&mut self) {
        if self.loading {
            self.set_message("A request is already in progress", MessageType::Warning);
            return;
        }

        let credential = self.form.build_credential(&self.tag_selection);
        if let Err(violations) = self.config.rules.validate(&credential) {
            debug!(count = violations.len(), "form rejected");
            self.errors = violations.iter().map(ToString::to_string).collect();
            return;
        }

        self.errors.clear();
        self.loading = true;
        self.request(ApiRequest::Submit(credential));
        self.set_message("Saving…", MessageType::Info);
    }

    fn copy_field(&mut self, field: CopiedField) {
        let Some(cred) = self.selected_credential() else { return };
        let text = match field {
            CopiedField::Password => cred.password.clone(),
            CopiedField::Username => cred.username.clone(),
        };

        match copy_with_timeout(&text, self.config.clipboard_timeout) {
            Ok(()) => self.mark_copied(field, Instant::now()),
            Err(e) => warn!(error = %e, field = field.label(), "clipboard copy failed"),
        }
    }

    fn request_delete(&mut self) {
        let Some(cred) = self.selected_credential() else { return };
        let Some(id) = cred.id else {
            self.set_message("Refresh before deleting a newly added credential", MessageType::Warning);
            return;
        };

        self.pending_action = Some(PendingAction::DeleteCredential { id, app: cred.app.clone() });
        self.mode_state.to_confirm();
    }

    fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.mode_state.to_normal();
    }

    fn handle_confirm(&mut self) {
        let Some(action) = self.pending_action.take() else {
            self.mode_state.to_normal();
            return;
        };

        match action {
            PendingAction::DeleteCredential { id, .. } => {
                self.loading = true;
                self.request(ApiRequest::Delete { id });
            }
        }

        self.mode_state.to_normal();
    }

    /// Apply a finished request to the state
    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Fetched(outcome) => self.apply_fetch(outcome),
            ApiEvent::Submitted { credential, result } => {
                self.loading = false;
                match result {
                    Ok(receipt) => {
                        info!(app = %credential.app, "credential saved");
                        self.credentials.push(credential);
                        self.refilter();
                        self.move_list(|ls| ls.move_to_bottom());
                        self.form.clear();
                        self.tag_selection.clear();
                        self.errors.clear();
                        self.show_view(View::Credentials);
                        let msg = receipt.message.unwrap_or_else(|| "Credential saved".to_string());
                        self.set_message(&msg, MessageType::Success);
                    }
                    Err(e) => {
                        warn!(error = %e, "submit failed");
                        self.errors = vec![e.to_string()];
                        self.set_message("Saving failed", MessageType::Error);
                    }
                }
            }
            ApiEvent::Deleted { id, result } => {
                self.loading = false;
                match result {
                    Ok(()) => {
                        self.credentials.retain(|c| c.id != Some(id));
                        self.refilter();
                        self.errors.clear();
                        self.set_message("Credential deleted", MessageType::Success);
                    }
                    Err(e) => {
                        warn!(id, error = %e, "delete failed");
                        self.errors = vec![e.to_string()];
                    }
                }
            }
            ApiEvent::Health(online) => self.api_online = Some(online),
        }
    }

    fn apply_fetch(&mut self, outcome: FetchOutcome) {
        self.loading = false;
        if outcome.is_ok() {
            self.credentials = outcome.credentials;
            self.errors.clear();
            self.refilter();
        } else {
            self.errors = outcome.errors;
        }
    }
}
