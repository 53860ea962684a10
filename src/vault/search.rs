//! Search Operations
//!
//! Case-insensitive substring filtering over the loaded credentials.

use crate::api::Credential;

fn field_contains(value: &str, needle_lower: &str) -> bool {
    value.to_lowercase().contains(needle_lower)
}

/// `needle_lower` must already be lowercased and trimmed.
fn credential_matches(cred: &Credential, needle_lower: &str) -> bool {
    field_contains(&cred.app, needle_lower)
        || field_contains(&cred.username, needle_lower)
        || cred.description.as_deref().is_some_and(|d| field_contains(d, needle_lower))
        || cred.tags().iter().any(|t| field_contains(t, needle_lower))
}

pub fn matches_query(cred: &Credential, query: &str) -> bool {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return true;
    }
    credential_matches(cred, &trimmed.to_lowercase())
}

/// Indices into `credentials` of the records matching `query`, in order.
pub fn filter_indices(credentials: &[Credential], query: &str) -> Vec<usize> {
    credentials
        .iter()
        .enumerate()
        .filter(|(_, c)| matches_query(c, query))
        .map(|(i, _)| i)
        .collect()
}
