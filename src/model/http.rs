/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Request construction
//!
//! A [`RequestSpec`] describes a call in terms of the API (method, logical route,
//! JSON parameters or raw body, headers). [`RequestBuilder`] resolves it against
//! the configured host into a [`NetworkRequest`] ready to be sent.

use crate::application::config::RestApiConfig;
use crate::constants::{headers, content_types};
use crate::error::AppError;
use crate::utils::id::request_id;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Set of HTTP headers backed by [`HeaderMap`]
///
/// Names are case-insensitive and inserting a name that is already present
/// replaces its value, so a set never holds two values for the same header.
/// Names and values are validated on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    map: HeaderMap,
}

impl HeaderSet {
    /// Creates an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any existing value for that name
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] if `name` or `value` cannot be sent as a header
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::InvalidInput(format!("invalid header name {name:?}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| AppError::InvalidInput(format!("invalid value for header {name}: {e}")))?;
        self.map.insert(header_name, header_value);
        Ok(())
    }

    /// Builder style [`insert`](Self::insert)
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] if `name` or `value` cannot be sent as a header
    pub fn with(mut self, name: &str, value: &str) -> Result<Self, AppError> {
        self.insert(name, value)?;
        Ok(self)
    }

    /// Returns the value of `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns true if `name` is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Removes `name` and returns its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.map
            .remove(name)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Applies every header of `other` on top of this set
    pub fn merge(&mut self, other: &HeaderSet) {
        for (name, value) in other.map.iter() {
            self.map.insert(name.clone(), value.clone());
        }
    }

    /// Iterates over `(name, value)` pairs; names are lowercase
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map
            .iter()
            .filter_map(|(n, v)| v.to_str().ok().map(|v| (n.as_str(), v)))
    }

    /// Number of headers
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no headers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The underlying map
    #[must_use]
    pub fn as_map(&self) -> &HeaderMap {
        &self.map
    }
}

impl From<HeaderMap> for HeaderSet {
    fn from(map: HeaderMap) -> Self {
        Self { map }
    }
}

/// Description of one API call
///
/// If both `parameters` and `body` are set, the JSON encoded parameters take
/// precedence and the raw body is discarded.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Logical route appended after the API version, e.g. `businesses/list`
    pub route: String,
    /// JSON parameters sent as the request body
    pub parameters: Option<Map<String, Value>>,
    /// Headers applied as-is
    pub headers: Option<HeaderSet>,
    /// Raw body
    pub body: Option<Vec<u8>>,
    /// Query string pairs
    pub query: Vec<(String, String)>,
}

impl RequestSpec {
    /// Creates a spec without parameters, headers or body
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        Self {
            method,
            route: route.into(),
            parameters: None,
            headers: None,
            body: None,
            query: Vec::new(),
        }
    }

    /// Shortcut for a GET spec
    pub fn get(route: impl Into<String>) -> Self {
        Self::new(Method::GET, route)
    }

    /// Shortcut for a POST spec
    pub fn post(route: impl Into<String>) -> Self {
        Self::new(Method::POST, route)
    }

    /// Shortcut for a DELETE spec
    pub fn delete(route: impl Into<String>) -> Self {
        Self::new(Method::DELETE, route)
    }

    /// Sets the JSON parameters
    #[must_use]
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    /// Sets the JSON parameters from any serializable value
    ///
    /// # Errors
    /// [`AppError::Encoding`] if `value` cannot be serialized or is not a JSON object
    pub fn with_serialized_parameters<T: Serialize>(self, value: &T) -> Result<Self, AppError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(self.with_parameters(map)),
            Ok(other) => Err(AppError::Encoding(format!(
                "parameters must be a JSON object, got {other}"
            ))),
            Err(e) => Err(AppError::Encoding(e.to_string())),
        }
    }

    /// Sets the headers
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderSet) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets the raw body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Appends a query string pair
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// A fully resolved request
#[derive(Debug, Clone)]
pub struct NetworkRequest {
    /// Identifier used to correlate log lines
    pub id: String,
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: Url,
    /// Headers to send
    pub headers: HeaderSet,
    /// Body to send, empty for none
    pub body: Vec<u8>,
}

impl NetworkRequest {
    /// Body parsed as JSON, if it is JSON
    #[must_use]
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Resolves [`RequestSpec`] values against the API host
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    scheme: String,
    host: String,
    version: String,
}

impl RequestBuilder {
    /// Creates a builder from the REST API configuration
    #[must_use]
    pub fn new(config: &RestApiConfig) -> Self {
        Self {
            scheme: config.scheme.clone(),
            host: config.host.clone(),
            version: config.version.clone(),
        }
    }

    /// Returns the absolute URL of `route`
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] if the resulting URL cannot be parsed
    pub fn url(&self, route: &str) -> Result<Url, AppError> {
        let route = route.trim_start_matches('/');
        let version = self.version.trim_matches('/');
        let raw = if version.is_empty() {
            format!("{}://{}/{}", self.scheme, self.host, route)
        } else {
            format!("{}://{}/{}/{}", self.scheme, self.host, version, route)
        };
        Url::parse(&raw).map_err(|e| AppError::InvalidInput(format!("invalid url {raw}: {e}")))
    }

    /// Builds the request described by `spec`
    ///
    /// Every built request carries exactly one `Content-Type`. JSON parameters
    /// always set `application/json`; otherwise a caller supplied value is kept, and
    /// a missing one defaults to `application/octet-stream` for a raw body and
    /// `application/json` for an empty one.
    ///
    /// # Errors
    /// * [`AppError::Encoding`] if the parameters cannot be serialized
    /// * [`AppError::InvalidInput`] if the URL is invalid
    pub fn build(&self, spec: &RequestSpec) -> Result<NetworkRequest, AppError> {
        let mut url = self.url(&spec.route)?;
        if !spec.query.is_empty() {
            url.query_pairs_mut().extend_pairs(spec.query.iter());
        }

        let mut header_set = spec.headers.clone().unwrap_or_default();

        let body = match (&spec.parameters, &spec.body) {
            (Some(parameters), _) => {
                let encoded = serde_json::to_vec(parameters)
                    .map_err(|e| AppError::Encoding(e.to_string()))?;
                header_set.insert(headers::CONTENT_TYPE, content_types::JSON)?;
                encoded
            }
            (None, Some(body)) => {
                if !header_set.contains(headers::CONTENT_TYPE) {
                    header_set.insert(headers::CONTENT_TYPE, content_types::OCTET_STREAM)?;
                }
                body.clone()
            }
            (None, None) => {
                if !header_set.contains(headers::CONTENT_TYPE) {
                    header_set.insert(headers::CONTENT_TYPE, content_types::JSON)?;
                }
                Vec::new()
            }
        };

        let request = NetworkRequest {
            id: request_id(),
            method: spec.method.clone(),
            url,
            headers: header_set,
            body,
        };
        debug!(
            "[{}] built {} {} ({} bytes)",
            request.id,
            request.method,
            request.url,
            request.body.len()
        );
        Ok(request)
    }
}
