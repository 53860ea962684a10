//! Application State
//!
//! Core application logic tying together the API worker, UI, and input.

mod actions;
mod clipboard;
mod config;
mod input;

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::Frame;
use tracing::debug;

use crate::api::{ApiRequest, Credential};
use crate::input::modes::ModeState;
use crate::ui::components::tags::filter_options;
use crate::ui::components::{
    CopiedField, CredentialForm, CredentialItem, DetailState, ListViewState, MessageType, TagPickerState,
};
use crate::ui::renderer::{Renderer, TagDropdownView, UiState, View};
use crate::vault::{filter_indices, known_tags, TagSelection};

pub use config::{AppConfig, PendingAction};

const MESSAGE_TTL: Duration = Duration::from_secs(5);

pub struct App {
    pub config: AppConfig,
    pub mode_state: ModeState,
    pub view: View,
    pub terminal_size: Rect,
    pub list_state: ListViewState,
    /// Every record known to the client, in server order plus local appends
    pub credentials: Vec<Credential>,
    /// Indices into `credentials` matching the current search
    pub visible: Vec<usize>,
    pub items: Vec<CredentialItem>,
    pub search: String,
    pub form: CredentialForm,
    pub tag_selection: TagSelection,
    pub tag_picker: TagPickerState,
    pub detail: DetailState,
    pub loading: bool,
    pub errors: Vec<String>,
    pub message: Option<(String, MessageType, Instant)>,
    pub pending_action: Option<PendingAction>,
    pub api_online: Option<bool>,
    pub should_quit: bool,
    outbox: Vec<ApiRequest>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            mode_state: ModeState::new(),
            view: View::Credentials,
            terminal_size: Rect::default(),
            list_state: ListViewState::new(),
            credentials: Vec::new(),
            visible: Vec::new(),
            items: Vec::new(),
            search: String::new(),
            form: CredentialForm::new(),
            tag_selection: TagSelection::new(),
            tag_picker: TagPickerState::new(),
            detail: DetailState::default(),
            loading: false,
            errors: Vec::new(),
            message: None,
            pending_action: None,
            api_online: None,
            should_quit: false,
            outbox: Vec::new(),
        }
    }

    /// Queue the initial load
    pub fn start(&mut self) {
        self.loading = true;
        self.request(ApiRequest::FetchAll);
        self.request(ApiRequest::Health);
    }

    fn request(&mut self, request: ApiRequest) {
        self.outbox.push(request);
    }

    /// Requests queued since the last call, for the worker to run
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|(_, _, at)| now.saturating_duration_since(*at) > MESSAGE_TTL);
        if expired {
            self.message = None;
        }
        self.detail.expire(now);
    }

    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        self.message = Some((msg.to_string(), msg_type, Instant::now()));
    }

    pub fn set_search(&mut self, term: &str) {
        if self.search != term {
            self.search = term.to_string();
            self.refilter();
        }
    }

    /// Rebuild the visible list from the full collection and search term
    pub fn refilter(&mut self) {
        let before = self.selected_index();
        self.visible = filter_indices(&self.credentials, &self.search);
        self.items = self
            .visible
            .iter()
            .map(|&i| CredentialItem::from(&self.credentials[i]))
            .collect();
        self.list_state.set_total(self.visible.len());
        if self.selected_index() != before {
            self.detail.reset();
        }
        debug!(visible = self.visible.len(), total = self.credentials.len(), "refiltered");
    }

    fn selected_index(&self) -> Option<usize> {
        self.list_state
            .selected()
            .and_then(|i| self.visible.get(i))
            .copied()
    }

    pub fn selected_credential(&self) -> Option<&Credential> {
        self.selected_index().map(|i| &self.credentials[i])
    }

    /// Known tags narrowed by the dropdown search
    pub fn tag_options(&self) -> Vec<String> {
        let known = known_tags(&self.credentials, &self.tag_selection);
        filter_options(&known, self.mode_state.get_buffer())
    }

    /// Dropdown rectangle while it is open
    pub fn tag_dropdown_area(&self) -> Option<Rect> {
        self.tag_picker
            .open
            .then(|| TagPickerState::area(self.terminal_size))
    }

    pub fn mark_copied(&mut self, field: CopiedField, now: Instant) {
        self.detail.mark_copied(field, now, self.config.copy_indicator);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.terminal_size = frame.area();

        let selected = self.selected_index().map(|i| &self.credentials[i]);
        let message = self.message.as_ref().map(|(m, t, _)| (m.as_str(), *t));
        let confirm_message = self.pending_action.as_ref().map(|a| a.confirm_message());
        let options = self.tag_options();
        let tag_dropdown = self.tag_dropdown_area().map(|area| TagDropdownView {
            options: &options,
            search: self.mode_state.get_buffer(),
            highlighted: self.tag_picker.highlighted,
            area,
        });

        let mut state = UiState {
            view: self.view,
            mode: self.mode_state.mode,
            items: &self.items,
            list_state: &mut self.list_state,
            total: self.credentials.len(),
            selected,
            detail_state: &self.detail,
            search: &self.search,
            errors: &self.errors,
            loading: self.loading,
            online: self.api_online,
            message,
            confirm_message: confirm_message.as_deref(),
            form: &self.form,
            tag_selection: &self.tag_selection,
            tag_dropdown,
        };

        Renderer::render(frame, &mut state);
    }
}
