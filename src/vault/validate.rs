//! Credential Validation
//!
//! Checks a record against the same limits the API enforces, so problems
//! show up before a round trip.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::api::Credential;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },

    #[error("Username must be between {min} and {max} characters")]
    UsernameLength { min: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRules {
    pub password_len: RangeInclusive<usize>,
    pub username_len: RangeInclusive<usize>,
}

impl Default for CredentialRules {
    fn default() -> Self {
        Self {
            password_len: 8..=64,
            username_len: 3..=32,
        }
    }
}

impl CredentialRules {
    /// Collects every violation, in field order.
    pub fn validate(&self, cred: &Credential) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        check_length(
            &cred.password,
            "Password",
            &self.password_len,
            |min, max| ValidationError::PasswordLength { min, max },
            &mut errors,
        );

        if cred.app.trim().is_empty() {
            errors.push(ValidationError::Missing("App"));
        }

        check_length(
            &cred.username,
            "Username",
            &self.username_len,
            |min, max| ValidationError::UsernameLength { min, max },
            &mut errors,
        );

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn check_length(
    value: &str,
    label: &'static str,
    range: &RangeInclusive<usize>,
    on_violation: impl Fn(usize, usize) -> ValidationError,
    errors: &mut Vec<ValidationError>,
) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Missing(label));
        return;
    }
    // The API measures UTF-8 bytes
    if !range.contains(&value.len()) {
        errors.push(on_violation(*range.start(), *range.end()));
    }
}
