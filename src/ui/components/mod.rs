//! UI Components
//!
//! Reusable TUI widgets for the credential client.

pub mod detail;
pub mod form;
pub mod list;
pub mod popup;
pub mod statusline;
pub mod tags;

// Re-exports
pub use detail::{CopiedField, DetailState, DetailView};
pub use form::{CredentialForm, CredentialFormWidget};
pub use list::{CredentialItem, CredentialList, EmptyState, ListViewState};
pub use popup::{ConfirmDialog, ErrorBlock};
pub use statusline::{HelpBar, MessageType, StatusLine};
pub use tags::{TagDropdown, TagPickerState};
