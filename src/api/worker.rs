//! Request Worker
//!
//! Runs transport calls on the tokio runtime and hands their outcomes back
//! to the UI loop, which drains them once per tick.

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::client::ApiClient;
use super::models::{Credential, FetchOutcome, SubmitReceipt};
use super::ApiResult;

/// Work the UI asks the worker to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    FetchAll,
    Submit(Credential),
    Delete { id: i64 },
    Health,
}

impl ApiRequest {
    fn name(&self) -> &'static str {
        match self {
            Self::FetchAll => "fetch_all",
            Self::Submit(_) => "submit",
            Self::Delete { .. } => "delete",
            Self::Health => "health",
        }
    }
}

/// Completed work delivered back to the UI
#[derive(Debug)]
pub enum ApiEvent {
    Fetched(FetchOutcome),
    Submitted {
        credential: Credential,
        result: ApiResult<SubmitReceipt>,
    },
    Deleted {
        id: i64,
        result: ApiResult<()>,
    },
    Health(bool),
}

pub async fn execute(client: &ApiClient, request: ApiRequest) -> ApiEvent {
    match request {
        ApiRequest::FetchAll => ApiEvent::Fetched(client.fetch_all().await),
        ApiRequest::Submit(credential) => {
            let result = client.submit(&credential).await;
            ApiEvent::Submitted { credential, result }
        }
        ApiRequest::Delete { id } => ApiEvent::Deleted {
            id,
            result: client.delete(id).await,
        },
        ApiRequest::Health => ApiEvent::Health(client.health().await),
    }
}

pub struct ApiWorker {
    client: ApiClient,
    runtime: Handle,
    tx: UnboundedSender<ApiEvent>,
    rx: UnboundedReceiver<ApiEvent>,
}

impl ApiWorker {
    pub fn new(client: ApiClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { client, runtime, tx, rx }
    }

    pub fn dispatch(&self, request: ApiRequest) {
        debug!(request = request.name(), "dispatching request");
        let client = self.client.clone();
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let event = execute(&client, request).await;
            // The receiver only goes away on shutdown
            let _ = tx.send(event);
        });
    }

    /// Next finished event, if any. Never blocks.
    pub fn try_next(&mut self) -> Option<ApiEvent> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    async fn next(&mut self) -> Option<ApiEvent> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::tests::{serve, vault_router};
    use std::time::Duration;

    #[tokio::test]
    async fn test_dispatch_delivers_events() {
        let base = serve(vault_router()).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();
        let mut worker = ApiWorker::new(client, Handle::current());

        assert!(worker.try_next().is_none());

        worker.dispatch(ApiRequest::FetchAll);
        match worker.next().await {
            Some(ApiEvent::Fetched(outcome)) => assert_eq!(outcome.credentials.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }

        worker.dispatch(ApiRequest::Submit(Credential::new("Slack", "bob", "password1")));
        match worker.next().await {
            Some(ApiEvent::Submitted { credential, result }) => {
                assert_eq!(credential.app, "Slack");
                assert_eq!(result.unwrap().message.as_deref(), Some("stored Slack"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_delete_and_health() {
        let base = serve(vault_router()).await;
        let client = ApiClient::new(&base, Duration::from_secs(5)).unwrap();

        match execute(&client, ApiRequest::Delete { id: 7 }).await {
            ApiEvent::Deleted { id, result } => {
                assert_eq!(id, 7);
                assert!(result.is_ok());
            }
            other => panic!("unexpected event: {other:?}"),
        }

        assert!(matches!(execute(&client, ApiRequest::Health).await, ApiEvent::Health(true)));
    }
}
