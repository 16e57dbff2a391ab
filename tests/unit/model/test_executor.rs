use crate::common::{SlowTransport, StubTransport};
use copyleaks_client::application::config::RestApiConfig;
use copyleaks_client::error::AppError;
use copyleaks_client::model::executor::RequestExecutor;
use copyleaks_client::model::http::{NetworkRequest, RequestBuilder, RequestSpec};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

fn request() -> NetworkRequest {
    RequestBuilder::new(&RestApiConfig::default())
        .build(&RequestSpec::get("businesses/list"))
        .unwrap()
}

#[tokio::test]
async fn execute_returns_parsed_json() {
    let transport = StubTransport::new();
    transport.push_json(StatusCode::OK, json!([{"ProcessId": "p1"}]));
    let executor = RequestExecutor::new(transport.clone());

    let value = executor.execute(request()).await.unwrap();
    assert_eq!(value, json!([{"ProcessId": "p1"}]));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn execute_surfaces_server_error_once() {
    let transport = StubTransport::new();
    transport.push_json(StatusCode::UNAUTHORIZED, json!({"Message": "denied"}));
    transport.push_json(StatusCode::OK, json!({}));
    let executor = RequestExecutor::new(transport.clone());

    let err = executor.execute(request()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    // no retry
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn execute_surfaces_network_error() {
    let transport = StubTransport::new();
    transport.push_error(AppError::Network("connection reset".to_string()));
    let executor = RequestExecutor::new(transport.clone());

    let err = executor.execute(request()).await.unwrap_err();
    assert!(matches!(err, AppError::Network(msg) if msg.contains("reset")));
}

#[tokio::test]
async fn execute_reports_invalid_json() {
    let transport = StubTransport::new();
    transport.push_raw(StatusCode::OK, "not json");
    let executor = RequestExecutor::new(transport);

    let err = executor.execute(request()).await.unwrap_err();
    assert!(matches!(err, AppError::Decoding(_)));
}

#[tokio::test]
async fn dispatch_delivers_exactly_once() {
    let transport = StubTransport::new();
    transport.push_json(StatusCode::OK, json!({"Amount": 5}));
    let executor = RequestExecutor::new(transport);

    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = oneshot::channel();
    let counter = calls.clone();
    let handle = executor.dispatch(request(), move |result| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });

    let result = rx.await.unwrap();
    assert_eq!(result.unwrap(), json!({"Amount": 5}));
    handle.join().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancel_delivers_cancelled_once() {
    let executor = RequestExecutor::new(Arc::new(SlowTransport));

    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = oneshot::channel();
    let counter = calls.clone();
    let mut handle = executor.dispatch(request(), move |result| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });
    handle.cancel();
    handle.cancel();

    let result = rx.await.unwrap();
    assert!(matches!(result, Err(AppError::Cancelled)));
    handle.join().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancel_after_completion_has_no_effect() {
    let transport = StubTransport::new();
    let executor = RequestExecutor::new(transport);

    let calls = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = oneshot::channel();
    let counter = calls.clone();
    let mut handle = executor.dispatch(request(), move |result| {
        counter.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });

    assert!(rx.await.unwrap().is_ok());
    handle.cancel();
    handle.join().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dropping_handle_lets_request_finish() {
    let transport = StubTransport::new();
    let executor = RequestExecutor::new(transport);

    let (tx, rx) = oneshot::channel();
    drop(executor.dispatch(request(), move |result| {
        let _ = tx.send(result);
    }));

    assert!(rx.await.unwrap().is_ok());
}
