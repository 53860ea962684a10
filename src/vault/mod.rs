//! Vault Module
//!
//! Client-side credential logic: filtering, tag selection and validation.

pub mod search;
pub mod tags;
pub mod validate;

// Re-exports
pub use search::filter_indices;
pub use tags::{known_tags, TagSelection};
pub use validate::CredentialRules;
