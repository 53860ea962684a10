//! API Client
//!
//! The four calls the UI makes against the local credential endpoint.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::{info, warn};
use url::Url;

use super::models::{Credential, FetchOutcome, SubmitReceipt};
use super::{ApiError, ApiResult};

pub const CREDENTIALS_PATH: &str = "api/v1/credentials";
pub const HEALTH_PATH: &str = "health";

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    credentials_url: Url,
    health_url: Url,
}

impl ApiClient {
    pub fn new(base: &Url, timeout: Duration) -> ApiResult<Self> {
        let base = with_trailing_slash(base);
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            credentials_url: base.join(CREDENTIALS_PATH)?,
            health_url: base.join(HEALTH_PATH)?,
        })
    }

    #[cfg(test)]
    pub fn credentials_url(&self) -> &Url {
        &self.credentials_url
    }

    /// Never fails: errors collapse into a single message on the outcome.
    pub async fn fetch_all(&self) -> FetchOutcome {
        match self.try_fetch_all().await {
            Ok(credentials) => {
                info!(count = credentials.len(), "fetched credentials");
                FetchOutcome::loaded(credentials)
            }
            Err(e) => {
                warn!(error = %e, url = %self.credentials_url, "fetching credentials failed");
                FetchOutcome::failed(e.to_string())
            }
        }
    }

    async fn try_fetch_all(&self) -> ApiResult<Vec<Credential>> {
        let resp = self
            .http
            .get(self.credentials_url.clone())
            .header(CONTENT_TYPE, JSON)
            .send()
            .await?;
        let body = success_body(resp).await?;

        // An empty table comes back as `null`
        let credentials: Option<Vec<Credential>> = serde_json::from_str(&body)?;
        Ok(credentials.unwrap_or_default())
    }

    pub async fn submit(&self, credential: &Credential) -> ApiResult<SubmitReceipt> {
        let resp = self
            .http
            .post(self.credentials_url.clone())
            .header(CONTENT_TYPE, JSON)
            .json(credential)
            .send()
            .await?;
        let body = success_body(resp).await?;
        let receipt = SubmitReceipt::from_body(&body)?;

        info!(app = %credential.app, "credential submitted");
        Ok(receipt)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = self.credential_url(id)?;
        let resp = self
            .http
            .delete(url)
            .header(CONTENT_TYPE, JSON)
            .send()
            .await?;
        success_body(resp).await?;

        info!(id, "credential deleted");
        Ok(())
    }

    pub async fn health(&self) -> bool {
        let result = self
            .http
            .get(self.health_url.clone())
            .header(CONTENT_TYPE, JSON)
            .send()
            .await;

        match result {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!(error = %e, "health check failed");
                false
            }
        }
    }

    fn credential_url(&self, id: i64) -> ApiResult<Url> {
        let mut url = self.credentials_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidEndpoint(self.credentials_url.to_string()))?
            .push(&id.to_string());
        Ok(url)
    }
}

fn with_trailing_slash(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

async fn success_body(resp: reqwest::Response) -> ApiResult<String> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }

    Ok(body)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::{header, HeaderMap, Method, StatusCode};
    use axum::routing::{delete, get};
    use axum::{Json, Router};
    use chrono::Utc;
    use serde_json::{json, Value};

    /// Method, content type and body of every request the server saw
    type Seen = Arc<Mutex<Vec<(Method, Option<String>, String)>>>;

    async fn record(State(seen): State<Seen>, method: Method, headers: HeaderMap, body: String) -> Json<Value> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let reply = if method == Method::GET { json!([]) } else { json!({ "message": "ok" }) };
        seen.lock().unwrap().push((method, content_type, body));
        Json(reply)
    }

    fn recording_router(seen: Seen) -> Router {
        Router::new()
            .route("/api/v1/credentials", get(record).post(record))
            .route("/api/v1/credentials/{id}", delete(record))
            .with_state(seen)
    }

    pub(crate) async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    pub(crate) fn vault_router() -> Router {
        Router::new()
            .route(
                "/api/v1/credentials",
                get(|| async { Json(json!([{"app": "Gmail", "username": "a@b.com", "password": "p"}])) })
                    .post(|Json(body): Json<Value>| async move {
                        let app = body["app"].as_str().unwrap_or_default().to_string();
                        (StatusCode::CREATED, Json(json!({ "message": format!("stored {}", app) })))
                    }),
            )
            .route(
                "/api/v1/credentials/{id}",
                delete(|Path(id): Path<i64>| async move {
                    if id == 7 {
                        (StatusCode::OK, Json(json!({ "message": "Credential deleted successfully" })))
                    } else {
                        (StatusCode::NOT_FOUND, Json(json!({ "error": "credential not found" })))
                    }
                }),
            )
            .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
    }

    fn failing_router() -> Router {
        Router::new().route(
            "/api/v1/credentials",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Database not initialized") })
                .post(|| async { (StatusCode::BAD_REQUEST, "invalid password provided") }),
        )
    }

    async fn client_for(router: Router) -> ApiClient {
        let base = serve(router).await;
        ApiClient::new(&base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_urls_from_base() {
        let base = Url::parse("http://localhost:8200").unwrap();
        let client = ApiClient::new(&base, Duration::from_secs(1)).unwrap();
        assert_eq!(client.credentials_url().as_str(), "http://localhost:8200/api/v1/credentials");
        assert_eq!(client.credential_url(12).unwrap().as_str(), "http://localhost:8200/api/v1/credentials/12");

        let prefixed = Url::parse("http://localhost:8200/vault").unwrap();
        let client = ApiClient::new(&prefixed, Duration::from_secs(1)).unwrap();
        assert_eq!(client.credentials_url().as_str(), "http://localhost:8200/vault/api/v1/credentials");
    }

    #[tokio::test]
    async fn test_fetch_all_success() {
        let client = client_for(vault_router()).await;

        let outcome = client.fetch_all().await;

        assert_eq!(outcome.credentials.len(), 1);
        assert_eq!(outcome.credentials[0].app, "Gmail");
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_error_status() {
        let client = client_for(failing_router()).await;

        let outcome = client.fetch_all().await;

        assert!(outcome.credentials.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_all_null_body() {
        let router = Router::new().route(
            "/api/v1/credentials",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], "null\n") }),
        );
        let client = client_for(router).await;

        let outcome = client.fetch_all().await;

        assert!(outcome.credentials.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{}", addr)).unwrap();
        let client = ApiClient::new(&base, Duration::from_secs(2)).unwrap();
        let outcome = client.fetch_all().await;

        assert!(outcome.credentials.is_empty());
        assert_eq!(outcome.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_success() {
        let client = client_for(vault_router()).await;
        let cred = Credential::new("Gmail", "a@b.com", "password1");

        let receipt = client.submit(&cred).await.unwrap();

        assert_eq!(receipt.message.as_deref(), Some("stored Gmail"));
    }

    #[tokio::test]
    async fn test_submit_failure_is_reported() {
        let client = client_for(failing_router()).await;
        let cred = Credential::new("Gmail", "a@b.com", "short");

        let err = client.submit(&cred).await.unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "invalid password provided");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_delete() {
        let client = client_for(vault_router()).await;

        assert!(client.delete(7).await.is_ok());
        assert!(matches!(client.delete(8).await, Err(ApiError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_health() {
        let client = client_for(vault_router()).await;
        assert!(client.health().await);

        let client = client_for(failing_router()).await;
        assert!(!client.health().await);
    }

    #[tokio::test]
    async fn test_requests_are_json_and_omit_server_fields() {
        let seen = Seen::default();
        let client = client_for(recording_router(seen.clone())).await;

        let mut cred = Credential::new("Gmail", "a@b.com", "password1").with_tags(["mail"]);
        cred.id = Some(5);
        cred.created_at = Some(Utc::now());
        cred.updated_at = Some(Utc::now());

        client.fetch_all().await;
        client.submit(&cred).await.unwrap();
        client.delete(3).await.unwrap();

        let seen = seen.lock().unwrap();
        let methods: Vec<&Method> = seen.iter().map(|(m, _, _)| m).collect();
        assert_eq!(methods, [&Method::GET, &Method::POST, &Method::DELETE]);
        for (method, content_type, _) in seen.iter() {
            assert_eq!(content_type.as_deref(), Some("application/json"), "{method}");
        }

        let posted: Value = serde_json::from_str(&seen[1].2).unwrap();
        assert_eq!(posted["app"], "Gmail");
        assert_eq!(posted["tags"], json!(["mail"]));
        for key in ["id", "created_at", "updated_at"] {
            assert!(posted.get(key).is_none(), "{key} was sent");
        }
    }
}
