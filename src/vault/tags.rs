//! Tag Selection
//!
//! Tags chosen for the credential being added.

use crate::api::Credential;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    selected: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the tag if absent, remove it if present. Returns whether the tag
    /// is selected afterwards. Blank tags are ignored.
    pub fn toggle(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }

        if let Some(pos) = self.selected.iter().position(|t| t == tag) {
            self.selected.remove(pos);
            return false;
        }

        self.selected.push(tag.to_string());
        true
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Tags for a new record; none selected means no tags field at all
    pub fn to_tags(&self) -> Option<Vec<String>> {
        if self.selected.is_empty() {
            None
        } else {
            Some(self.selected.clone())
        }
    }
}

/// Every tag in use plus the current selection, sorted and deduplicated
pub fn known_tags(credentials: &[Credential], selection: &TagSelection) -> Vec<String> {
    let mut tags: Vec<String> = credentials
        .iter()
        .flat_map(|c| c.tags().iter().cloned())
        .chain(selection.as_slice().iter().cloned())
        .filter(|t| !t.trim().is_empty())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
