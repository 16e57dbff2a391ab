/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Client for the Copyleaks API
//!
//! Each operation picks a route, assembles its parameters or upload body and
//! headers, then hands the request to the executor.
//!
//! # Example
//! ```ignore
//! use copyleaks_client::prelude::*;
//!
//! let client = Client::new(Config::new())?;
//! client.login("user@example.com", "api-key").await?;
//! let credits = client.count_credits().await?;
//! ```

use crate::application::auth::{AccessToken, AuthTokenProvider, FileTokenStore, MemoryTokenStore};
use crate::application::config::Config;
use crate::application::headers::{CallbackOptions, HeaderBuilder, default_headers};
use crate::application::interfaces::scan::ScanService;
use crate::constants::{TOKEN_EXPIRY_MARGIN_SECS, content_types, headers};
use crate::error::AppError;
use crate::model::executor::{ReqwestTransport, RequestExecutor, RequestHandle, Transport};
use crate::model::http::{HeaderSet, NetworkRequest, RequestBuilder, RequestSpec};
use crate::model::multipart::{MultipartEncoder, MultipartFile};
use crate::model::requests::{CreateByUrlRequest, LoginRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const LOGIN_ROUTE: &str = "account/login-api";
const OCR_LANGUAGES_ROUTE: &str = "miscellaneous/ocr-languages-list";
const SUPPORTED_FILE_TYPES_ROUTE: &str = "miscellaneous/supported-file-types";

/// Client for the Copyleaks API
///
/// Clones share the access token and the transport.
#[derive(Clone)]
pub struct Client {
    config: Arc<Config>,
    auth: AuthTokenProvider,
    header_builder: HeaderBuilder,
    request_builder: RequestBuilder,
    encoder: MultipartEncoder,
    executor: RequestExecutor,
}

impl Client {
    /// Creates a client sending requests with `reqwest`
    ///
    /// The token is persisted to `config.token_path` when set, kept in memory
    /// otherwise.
    ///
    /// # Errors
    /// [`AppError::Network`] if the HTTP client cannot be created
    pub fn new(config: Config) -> Result<Self, AppError> {
        let transport = Arc::new(ReqwestTransport::new(&config.rest_api)?);
        let auth = match &config.token_path {
            Some(path) => AuthTokenProvider::new(Arc::new(FileTokenStore::new(path))),
            None => AuthTokenProvider::new(Arc::new(MemoryTokenStore::new())),
        };
        Ok(Self::with_transport(config, transport, auth))
    }

    /// Creates a client over a custom transport and token provider
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
        auth: AuthTokenProvider,
    ) -> Self {
        let request_builder = RequestBuilder::new(&config.rest_api);
        Self {
            config: Arc::new(config),
            auth,
            header_builder: HeaderBuilder::new(),
            request_builder,
            encoder: MultipartEncoder::default(),
            executor: RequestExecutor::new(transport),
        }
    }

    /// Replaces the multipart encoder
    #[must_use]
    pub fn with_encoder(mut self, encoder: MultipartEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Configuration of this client
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Token provider of this client
    #[must_use]
    pub fn auth(&self) -> &AuthTokenProvider {
        &self.auth
    }

    /// Executor of this client
    #[must_use]
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// Request builder of this client
    #[must_use]
    pub fn request_builder(&self) -> &RequestBuilder {
        &self.request_builder
    }

    /// Logs in with the credentials of the configuration
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] if the configuration has no credentials
    pub async fn login_with_config(&self) -> Result<Value, AppError> {
        let credentials = &self.config.credentials;
        if !credentials.is_complete() {
            return Err(AppError::InvalidInput(
                "email and api key are required to log in".to_string(),
            ));
        }
        self.login(&credentials.email, &credentials.api_key).await
    }

    /// Logs in again with the configured credentials when the token is missing or
    /// about to expire
    pub async fn ensure_token(&self) -> Result<Option<AccessToken>, AppError> {
        if self.auth.needs_refresh(TOKEN_EXPIRY_MARGIN_SECS)
            && self.config.credentials.is_complete()
        {
            info!("Access token missing or expiring, logging in");
            self.login_with_config().await?;
        }
        Ok(self.auth.current())
    }

    /// Clears the stored access token
    pub fn logout(&self) -> Result<(), AppError> {
        self.auth.clear()
    }

    /// Builds and sends `spec`, delivering the outcome to `on_complete`
    ///
    /// The spec's headers are applied on top of the default headers and the
    /// `Authorization` of the stored token, if any. A raw body without a
    /// `Content-Type` is sent as `application/octet-stream`. `on_complete` runs exactly once
    /// on a worker task, also when the spec cannot be built.
    pub fn dispatch<F>(&self, spec: RequestSpec, on_complete: F) -> RequestHandle
    where
        F: FnOnce(Result<Value, AppError>) + Send + 'static,
    {
        match self.dispatch_request(spec) {
            Ok(request) => self.executor.dispatch(request, on_complete),
            Err(e) => self.executor.dispatch_error(e, on_complete),
        }
    }

    fn dispatch_request(&self, mut spec: RequestSpec) -> Result<NetworkRequest, AppError> {
        let mut header_set = self
            .header_builder
            .authenticated(self.auth.current().as_ref())?;
        let caller_content_type = spec
            .headers
            .as_ref()
            .is_some_and(|h| h.contains(headers::CONTENT_TYPE));
        if spec.parameters.is_none() && spec.body.is_some() && !caller_content_type {
            // the builder picks the type of a raw body
            header_set.remove(headers::CONTENT_TYPE);
        }
        if let Some(caller) = &spec.headers {
            header_set.merge(caller);
        }
        spec.headers = Some(header_set);
        self.request_builder.build(&spec)
    }

    fn product_route(&self, action: &str) -> String {
        format!("{}/{}", self.config.product.as_route(), action)
    }

    fn process_route(&self, process_id: &str, action: &str) -> Result<String, AppError> {
        let process_id = process_id.trim();
        if !is_valid_process_id(process_id) {
            return Err(AppError::InvalidInput(format!(
                "invalid process id: {process_id:?}"
            )));
        }
        Ok(format!(
            "{}/{}/{}",
            self.config.product.as_route(),
            process_id,
            action
        ))
    }

    async fn token(&self) -> Result<Option<AccessToken>, AppError> {
        let token = self.ensure_token().await?;
        if token.is_none() {
            if self.config.strict_auth {
                return Err(AppError::Unauthenticated);
            }
            warn!("No access token stored, sending request without Authorization");
        }
        Ok(token)
    }

    async fn authorized_headers(&self) -> Result<HeaderSet, AppError> {
        let token = self.token().await?;
        self.header_builder.authenticated(token.as_ref())
    }

    async fn scan_headers(&self, options: &CallbackOptions) -> Result<HeaderSet, AppError> {
        let token = self.token().await?;
        self.header_builder.build(
            &default_headers(),
            token.as_ref(),
            options,
            self.config.sandbox,
        )
    }

    async fn send(&self, spec: RequestSpec) -> Result<Value, AppError> {
        let request = self.request_builder.build(&spec)?;
        self.executor.execute(request).await
    }

    async fn upload(
        &self,
        action: &str,
        file: &MultipartFile,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError> {
        let multipart = self.encoder.encode(file);
        let mut header_set = self.scan_headers(options).await?;
        header_set.insert(headers::ACCEPT, content_types::JSON)?;
        header_set.insert(headers::CONTENT_TYPE, &multipart.content_type())?;
        header_set.insert(headers::CONTENT_LENGTH, &multipart.len().to_string())?;

        debug!(
            "Uploading {} ({} bytes encoded)",
            file.upload_filename(),
            multipart.len()
        );

        let mut spec = RequestSpec::post(self.product_route(action))
            .with_headers(header_set)
            .with_body(multipart.body);
        let language = language.trim();
        if !language.is_empty() {
            spec = spec.with_query("language", language);
        }
        self.send(spec).await
    }
}

/// Process ids become a single path segment: unreserved URL characters only
fn is_valid_process_id(process_id: &str) -> bool {
    !process_id.is_empty()
        && process_id != "."
        && process_id != ".."
        && process_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

#[async_trait]
impl ScanService for Client {
    async fn login(&self, email: &str, api_key: &str) -> Result<Value, AppError> {
        info!("Logging in as {}", email);
        let spec = RequestSpec::post(LOGIN_ROUTE)
            .with_serialized_parameters(&LoginRequest::new(email, api_key))?
            .with_headers(default_headers());

        let response = self.send(spec).await?;
        let token = AccessToken::from_login_response(&response)?;
        if let Err(e) = self.auth.save(token) {
            warn!("Access token could not be persisted: {}", e);
        }
        info!("✓ Login successful");
        Ok(response)
    }

    async fn create_by_url(
        &self,
        url: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError> {
        let spec = RequestSpec::post(self.product_route("create-by-url"))
            .with_serialized_parameters(&CreateByUrlRequest::new(url))?
            .with_headers(self.scan_headers(options).await?);
        self.send(spec).await
    }

    async fn create_by_file(
        &self,
        path: &Path,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError> {
        let file = MultipartFile::from_path(path).await?;
        self.create_by_file_content(&file, language, options).await
    }

    async fn create_by_file_content(
        &self,
        file: &MultipartFile,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError> {
        self.upload("create-by-file", file, language, options).await
    }

    async fn create_by_text(
        &self,
        text: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError> {
        let mut header_set = self.scan_headers(options).await?;
        header_set.insert(headers::CONTENT_TYPE, content_types::TEXT)?;
        let spec = RequestSpec::post(self.product_route("create-by-text"))
            .with_headers(header_set)
            .with_body(text.as_bytes());
        self.send(spec).await
    }

    async fn create_by_ocr(
        &self,
        path: &Path,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError> {
        let file = MultipartFile::from_path(path).await?;
        self.create_by_ocr_content(&file, language, options).await
    }

    async fn create_by_ocr_content(
        &self,
        file: &MultipartFile,
        language: &str,
        options: &CallbackOptions,
    ) -> Result<Value, AppError> {
        self.upload("create-by-file-ocr", file, language, options)
            .await
    }

    async fn status(&self, process_id: &str) -> Result<Value, AppError> {
        let spec = RequestSpec::get(self.process_route(process_id, "status")?)
            .with_headers(self.authorized_headers().await?);
        self.send(spec).await
    }

    async fn result(&self, process_id: &str) -> Result<Value, AppError> {
        let spec = RequestSpec::get(self.process_route(process_id, "result")?)
            .with_headers(self.authorized_headers().await?);
        self.send(spec).await
    }

    async fn delete(&self, process_id: &str) -> Result<Value, AppError> {
        let spec = RequestSpec::delete(self.process_route(process_id, "delete")?)
            .with_headers(self.authorized_headers().await?);
        self.send(spec).await
    }

    async fn list(&self) -> Result<Value, AppError> {
        let spec = RequestSpec::get(self.product_route("list"))
            .with_headers(self.authorized_headers().await?);
        self.send(spec).await
    }

    async fn count_credits(&self) -> Result<Value, AppError> {
        let spec = RequestSpec::get(self.product_route("count-credits"))
            .with_headers(self.authorized_headers().await?);
        self.send(spec).await
    }

    async fn languages_list(&self) -> Result<Value, AppError> {
        let spec = RequestSpec::get(OCR_LANGUAGES_ROUTE).with_headers(default_headers());
        self.send(spec).await
    }

    async fn supported_file_types(&self) -> Result<Value, AppError> {
        let spec = RequestSpec::get(SUPPORTED_FILE_TYPES_ROUTE).with_headers(default_headers());
        self.send(spec).await
    }
}
