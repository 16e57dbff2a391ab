use assert_json_diff::assert_json_eq;
use copyleaks_client::application::config::RestApiConfig;
use copyleaks_client::model::http::{HeaderSet, RequestBuilder, RequestSpec};
use copyleaks_client::error::AppError;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Map, Value, json};

fn builder() -> RequestBuilder {
    RequestBuilder::new(&RestApiConfig::default())
}

#[test]
fn url_is_built_from_host_version_and_route() {
    let url = builder().url("businesses/list").unwrap();
    assert_eq!(url.as_str(), "https://api.copyleaks.com/v1/businesses/list");

    let url = builder().url("/miscellaneous/ocr-languages-list").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.copyleaks.com/v1/miscellaneous/ocr-languages-list"
    );
}

#[test]
fn parameters_round_trip_through_body() {
    let params = json!({
        "Email": "user@example.com",
        "ApiKey": "key123",
        "Nested": {"a": [1, 2, 3], "b": null}
    });
    let Value::Object(map) = params.clone() else {
        unreachable!()
    };

    let request = builder()
        .build(&RequestSpec::post("account/login-api").with_parameters(map))
        .unwrap();

    assert_eq!(request.method, Method::POST);
    assert_json_eq!(request.json_body().unwrap(), params);
    assert_eq!(request.headers.get("content-type"), Some("application/json"));
}

#[test]
fn parameters_override_raw_body() {
    let mut map = Map::new();
    map.insert("Url".to_string(), json!("http://example.com/doc"));

    let request = builder()
        .build(
            &RequestSpec::post("businesses/create-by-url")
                .with_body(b"raw text".to_vec())
                .with_parameters(map),
        )
        .unwrap();

    assert_eq!(request.json_body(), Some(json!({"Url": "http://example.com/doc"})));
}

#[test]
fn raw_body_is_used_as_is() {
    let headers = HeaderSet::new().with("Content-Type", "text/plain").unwrap();
    let request = builder()
        .build(
            &RequestSpec::post("businesses/create-by-text")
                .with_headers(headers)
                .with_body("some text".as_bytes()),
        )
        .unwrap();

    assert_eq!(request.body, b"some text");
    assert_eq!(request.headers.get("Content-Type"), Some("text/plain"));
}

#[test]
fn empty_spec_has_empty_body_and_json_content_type() {
    let request = builder().build(&RequestSpec::get("businesses/list")).unwrap();
    assert!(request.body.is_empty());
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.headers.get("content-type"), Some("application/json"));
    assert_eq!(request.method, Method::GET);
}

#[test]
fn raw_body_without_content_type_is_octet_stream() {
    let request = builder()
        .build(&RequestSpec::post("businesses/create-by-text").with_body("hello"))
        .unwrap();
    assert_eq!(request.body, b"hello");
    assert_eq!(
        request.headers.get("Content-Type"),
        Some("application/octet-stream")
    );
}

#[test]
fn json_parameters_replace_caller_content_type() {
    let headers = HeaderSet::new()
        .with("content-type", "text/plain")
        .and_then(|h| h.with("X-Custom", "1"))
        .unwrap();
    let mut map = Map::new();
    map.insert("k".to_string(), json!("v"));

    let request = builder()
        .build(
            &RequestSpec::post("r")
                .with_headers(headers)
                .with_parameters(map),
        )
        .unwrap();

    let content_types: Vec<_> = request
        .headers
        .iter()
        .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
        .collect();
    assert_eq!(content_types.len(), 1);
    assert_eq!(content_types[0].1, "application/json");
    assert_eq!(request.headers.get("x-custom"), Some("1"));
}

#[test]
fn query_pairs_are_encoded() {
    let request = builder()
        .build(&RequestSpec::post("businesses/create-by-file").with_query("language", "Chinese Simplified"))
        .unwrap();
    assert_eq!(request.url.query(), Some("language=Chinese+Simplified"));
}

#[test]
fn serialized_parameters_accept_structs() {
    #[derive(serde::Serialize)]
    struct Params {
        #[serde(rename = "Url")]
        url: String,
    }

    let spec = RequestSpec::post("x")
        .with_serialized_parameters(&Params {
            url: "http://a".to_string(),
        })
        .unwrap();
    assert_eq!(spec.parameters.unwrap().get("Url"), Some(&json!("http://a")));
}

#[test]
fn each_request_gets_an_id() {
    let first = builder().build(&RequestSpec::get("a")).unwrap();
    let second = builder().build(&RequestSpec::get("a")).unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn header_set_merge_overrides_in_place() {
    let mut base = HeaderSet::new()
        .with("A", "1")
        .and_then(|h| h.with("B", "2"))
        .unwrap();
    let overrides = HeaderSet::new()
        .with("b", "3")
        .and_then(|h| h.with("C", "4"))
        .unwrap();
    base.merge(&overrides);

    assert_eq!(base.len(), 3);
    assert_eq!(base.get("B"), Some("3"));
    assert_eq!(base.get("c"), Some("4"));
    assert!(base.contains("a"));
}

#[test]
fn header_set_wraps_a_header_map() {
    let mut map = HeaderMap::new();
    map.insert("x-one", HeaderValue::from_static("1"));
    let set = HeaderSet::from(map.clone());
    assert_eq!(set.get("X-One"), Some("1"));
    assert_eq!(set.as_map(), &map);
}

#[test]
fn invalid_header_values_fail_before_building() {
    let mut set = HeaderSet::new();
    let err = set
        .insert("copyleaks-client-custom-message", "line1\nline2")
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(!set.contains("copyleaks-client-custom-message"));
}
