//! API Module
//!
//! HTTP transport for the PassVault credential endpoint.

pub mod client;
pub mod models;
pub mod worker;

use thiserror::Error;

/// Transport errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<url::ParseError> for ApiError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidEndpoint(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// Re-exports
pub use client::ApiClient;
pub use models::{Credential, FetchOutcome};
pub use worker::{ApiEvent, ApiRequest, ApiWorker};
