// Common utilities for unit tests

use copyleaks_client::prelude::*;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Transport answering from a queue of canned responses and recording every request
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<RawResponse, AppError>>>,
    requests: Mutex<Vec<NetworkRequest>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: StatusCode, body: Value) {
        self.push_raw(status, body.to_string());
    }

    pub fn push_raw(&self, status: StatusCode, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
    }

    pub fn push_error(&self, error: AppError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<NetworkRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> NetworkRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: &NetworkRequest) -> Result<RawResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(StatusCode::OK, "{}")))
    }
}

/// Transport that never answers in time
pub struct SlowTransport;

#[async_trait]
impl Transport for SlowTransport {
    async fn send(&self, _request: &NetworkRequest) -> Result<RawResponse, AppError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(RawResponse::new(StatusCode::OK, "{}"))
    }
}

/// Client over `transport` with an in-memory token and no credentials
pub fn stub_client(config: Config, transport: Arc<StubTransport>) -> Client {
    Client::with_transport(config, transport, AuthTokenProvider::in_memory())
}

/// Built-in configuration, independent of the environment
pub fn test_config() -> Config {
    Config::builtin()
}
