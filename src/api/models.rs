//! API Models
//!
//! Wire shapes exchanged with the credential endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiResult;

/// Credential record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Server-assigned identifier, never sent on create
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    pub password: String,
    #[serde(default)]
    pub app: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(app: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[cfg(test)]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Description, treating an empty string as absent
    pub fn note(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Result of a fetch-all call: either records or error strings, never both
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub credentials: Vec<Credential>,
    pub errors: Vec<String>,
}

impl FetchOutcome {
    pub fn loaded(credentials: Vec<Credential>) -> Self {
        Self { credentials, errors: Vec::new() }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { credentials: Vec::new(), errors: vec![error.into()] }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decoded create response. The server answers with a `{"message": ...}`
/// object; anything else that is valid JSON is accepted without a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub message: Option<String>,
}

impl SubmitReceipt {
    pub fn from_body(body: &str) -> ApiResult<Self> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_str(body)?;
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Ok(Self { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal_record() {
        let json = r#"{"app":"Gmail","username":"a@b.com","password":"p"}"#;
        let cred: Credential = serde_json::from_str(json).unwrap();

        assert_eq!(cred.app, "Gmail");
        assert_eq!(cred.id, None);
        assert!(cred.tags().is_empty());
        assert_eq!(cred.note(), None);
    }

    #[test]
    fn test_decode_server_record() {
        let json = r#"{
            "id": 3,
            "username": "alice",
            "password": "hunter22",
            "created_at": "2025-06-01T10:00:00.123456+02:00",
            "updated_at": "2025-06-01T10:00:00Z",
            "description": "",
            "tags": null
        }"#;
        let cred: Credential = serde_json::from_str(json).unwrap();

        assert_eq!(cred.id, Some(3));
        assert_eq!(cred.app, "");
        assert!(cred.tags().is_empty());
        assert_eq!(cred.note(), None);
        assert!(cred.created_at.is_some());
    }

    #[test]
    fn test_encode_skips_server_fields() {
        let mut cred = Credential::new("Slack", "bob", "s3cretpass").with_tags(["work"]);
        cred.id = Some(9);

        let value = serde_json::to_value(&cred).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("created_at"));
        assert!(!obj.contains_key("description"));
        assert_eq!(obj["tags"], serde_json::json!(["work"]));
        assert_eq!(obj["app"], "Slack");
    }

    #[test]
    fn test_receipt_from_body() {
        let receipt = SubmitReceipt::from_body(r#"{"message":"Credential stored successfully"}"#).unwrap();
        assert_eq!(receipt.message.as_deref(), Some("Credential stored successfully"));

        assert_eq!(SubmitReceipt::from_body("").unwrap(), SubmitReceipt::default());
        assert_eq!(SubmitReceipt::from_body("[1,2]").unwrap().message, None);
        assert!(SubmitReceipt::from_body("not json").is_err());
    }
}
