/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Request execution
//!
//! [`RequestExecutor`] sends a [`NetworkRequest`] through a [`Transport`] and turns
//! the response into exactly one `Result<Value, AppError>`. Requests are never
//! retried.

use crate::application::config::RestApiConfig;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::http::NetworkRequest;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Status and body of an HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response body
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as lossy UTF-8
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests over the network
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response, whatever its status
    async fn send(&self, request: &NetworkRequest) -> Result<RawResponse, AppError>;
}

/// [`Transport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport using the configured timeout
    ///
    /// # Errors
    /// [`AppError::Network`] if the underlying client cannot be created
    pub fn new(config: &RestApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &NetworkRequest) -> Result<RawResponse, AppError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.as_map().clone());
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

/// Executes built requests
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    /// Creates an executor over `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends `request` and parses the JSON response
    ///
    /// # Returns
    /// * `Ok(Value)` - parsed body of a 2xx response, `Value::Null` when empty
    /// * `Err(AppError::Server)` - non-2xx response
    /// * `Err(AppError::Decoding)` - 2xx response whose body is not JSON
    /// * `Err(AppError::Network)` - transport failure
    pub async fn execute(&self, request: NetworkRequest) -> Result<Value, AppError> {
        debug!("[{}] {} {}", request.id, request.method, request.url);
        let response = self.transport.send(&request).await.inspect_err(|e| {
            error!("[{}] transport failure: {}", request.id, e);
        })?;
        debug!("[{}] response status: {}", request.id, response.status);
        parse_response(&request.id, response)
    }

    /// Runs `request` on a tokio worker and hands the outcome to `on_complete`
    ///
    /// `on_complete` is called exactly once, from the worker task. Cancelling the
    /// returned handle before completion delivers [`AppError::Cancelled`].
    pub fn dispatch<F>(&self, request: NetworkRequest, on_complete: F) -> RequestHandle
    where
        F: FnOnce(Result<Value, AppError>) + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let executor = self.clone();
        let id = request.id.clone();

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                result = executor.execute(request) => result,
                Ok(()) = cancel_rx => {
                    warn!("[{}] request cancelled", id);
                    Err(AppError::Cancelled)
                }
            };
            on_complete(outcome);
        });

        RequestHandle {
            cancel: Some(cancel_tx),
            task,
        }
    }

    /// Delivers `error` to `on_complete` from a worker task, as a failed request would
    pub fn dispatch_error<F>(&self, error: AppError, on_complete: F) -> RequestHandle
    where
        F: FnOnce(Result<Value, AppError>) + Send + 'static,
    {
        let task = tokio::spawn(async move { on_complete(Err(error)) });
        RequestHandle { cancel: None, task }
    }
}

/// Handle to a dispatched request
#[derive(Debug)]
pub struct RequestHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RequestHandle {
    /// Cancels the request
    ///
    /// Has no effect if the completion was already delivered. Dropping the handle
    /// without calling this lets the request run to completion.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Returns true once the completion has been delivered
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the completion has been delivered
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            error!("request task failed: {}", e);
        }
    }
}

fn parse_response(id: &str, response: RawResponse) -> Result<Value, AppError> {
    if !response.status.is_success() {
        let body = response.text();
        error!("[{}] request failed with status {}: {}", id, response.status, body);
        return Err(AppError::Server {
            status: response.status,
            body,
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        error!("[{}] invalid JSON in response: {}", id, e);
        AppError::Decoding(e.to_string())
    })
}
