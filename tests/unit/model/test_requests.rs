use copyleaks_client::model::requests::{CreateByUrlRequest, LoginRequest};
use serde_json::json;

#[test]
fn login_request_uses_vendor_field_names() {
    let request = LoginRequest::new("user@example.com", "key123");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"Email": "user@example.com", "ApiKey": "key123"})
    );
}

#[test]
fn login_request_debug_hides_api_key() {
    let rendered = format!("{:?}", LoginRequest::new("user@example.com", "key123"));
    assert!(rendered.contains("user@example.com"));
    assert!(!rendered.contains("key123"));
}

#[test]
fn create_by_url_request_serialization() {
    let request = CreateByUrlRequest::new("http://example.com/doc");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"Url": "http://example.com/doc"})
    );
}
