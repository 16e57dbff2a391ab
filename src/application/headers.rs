/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Header composition
//!
//! Headers are layered: defaults, then `Authorization`, then the per-call feature
//! flags, then whatever the caller merges on top. The default set is a template
//! computed once per process and cloned for every request.

use crate::application::auth::AccessToken;
use crate::constants::{
    CACHE_CONTROL_VALUE, DEFAULT_ACCEPT_LANGUAGE, MAX_ACCEPT_LANGUAGES, USER_AGENT,
    content_types, headers,
};
use crate::error::AppError;
use crate::model::http::HeaderSet;
use crate::utils::config::get_first_env;
use once_cell::sync::Lazy;
use reqwest::header::{
    ACCEPT_LANGUAGE as ACCEPT_LANGUAGE_HEADER, CACHE_CONTROL, CONTENT_TYPE, HeaderMap,
    HeaderValue, USER_AGENT as USER_AGENT_HEADER,
};
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

static DEFAULT_HEADERS: Lazy<HeaderSet> = Lazy::new(|| {
    let mut map = HeaderMap::new();
    map.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    map.insert(CONTENT_TYPE, HeaderValue::from_static(content_types::JSON));
    map.insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));
    let accept_language = HeaderValue::from_str(&ACCEPT_LANGUAGE)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));
    map.insert(ACCEPT_LANGUAGE_HEADER, accept_language);
    HeaderSet::from(map)
});

static ACCEPT_LANGUAGE: Lazy<String> = Lazy::new(|| {
    let preferred = get_first_env(&["LANGUAGE"])
        .map(|list| list.split(':').map(str::to_string).collect::<Vec<_>>())
        .or_else(|| get_first_env(&["LC_ALL", "LC_MESSAGES", "LANG"]).map(|l| vec![l]))
        .unwrap_or_default();
    accept_language(&preferred)
});

/// Builds an `Accept-Language` value from locales in preference order
///
/// POSIX locale names (`pt_BR.UTF-8`) are converted to language tags (`pt-BR`);
/// `C` and `POSIX` are skipped. At most six locales are kept, weighted `1.0`,
/// `0.9`, `0.8`, ...
///
/// ```
/// use copyleaks_client::application::headers::accept_language;
/// let value = accept_language(&["en_US.UTF-8".to_string(), "fr".to_string()]);
/// assert_eq!(value, "en-US;q=1.0, fr;q=0.9");
/// ```
#[must_use]
pub fn accept_language(locales: &[String]) -> String {
    let tags: Vec<String> = locales
        .iter()
        .filter_map(|l| language_tag(l))
        .take(MAX_ACCEPT_LANGUAGES)
        .collect();
    if tags.is_empty() {
        return DEFAULT_ACCEPT_LANGUAGE.to_string();
    }
    tags.iter()
        .enumerate()
        .map(|(index, tag)| format!("{tag};q={:.1}", 1.0 - index as f64 * 0.1))
        .collect::<Vec<_>>()
        .join(", ")
}

fn language_tag(locale: &str) -> Option<String> {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// A fresh copy of the default headers
#[must_use]
pub fn default_headers() -> HeaderSet {
    DEFAULT_HEADERS.clone()
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
/// Per-call feature flags sent as headers on scan creation
pub struct CallbackOptions {
    /// URL called when the process completes; `{PID}` is replaced by the process id
    pub http_callback: Option<String>,
    /// Address emailed when the process completes
    pub email_callback: Option<String>,
    /// Payload echoed back with the results
    pub client_custom_message: Option<String>,
    /// Scan as much as the remaining credits allow instead of failing
    pub allow_partial_scan: bool,
}

impl CallbackOptions {
    /// Options with nothing set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP callback
    #[must_use]
    pub fn with_http_callback(mut self, url: impl Into<String>) -> Self {
        self.http_callback = Some(url.into());
        self
    }

    /// Sets the email callback
    #[must_use]
    pub fn with_email_callback(mut self, email: impl Into<String>) -> Self {
        self.email_callback = Some(email.into());
        self
    }

    /// Sets the custom message
    #[must_use]
    pub fn with_client_custom_message(mut self, message: impl Into<String>) -> Self {
        self.client_custom_message = Some(message.into());
        self
    }

    /// Allows partial scans
    #[must_use]
    pub fn with_allow_partial_scan(mut self, allow: bool) -> Self {
        self.allow_partial_scan = allow;
        self
    }
}

/// Composes request headers
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderBuilder;

impl HeaderBuilder {
    /// Creates a builder
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the headers of one request
    ///
    /// Starts from a copy of `base`, adds `Authorization` when a token is given,
    /// then each flag of `options` that is set. `base` is never modified.
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] if the token or an option cannot be sent as a
    /// header value, e.g. a custom message spanning several lines
    pub fn build(
        &self,
        base: &HeaderSet,
        token: Option<&AccessToken>,
        options: &CallbackOptions,
        sandbox: bool,
    ) -> Result<HeaderSet, AppError> {
        let mut set = base.clone();

        if let Some(token) = token {
            set.insert(headers::AUTHORIZATION, &token.authorization_value())?;
        }
        if sandbox {
            set.insert(headers::SANDBOX_MODE, "true")?;
        }
        if options.allow_partial_scan {
            set.insert(headers::ALLOW_PARTIAL_SCAN, "true")?;
        }
        if let Some(url) = non_empty(&options.http_callback) {
            set.insert(headers::HTTP_CALLBACK, url)?;
        }
        if let Some(email) = non_empty(&options.email_callback) {
            set.insert(headers::EMAIL_CALLBACK, email)?;
        }
        if let Some(message) = non_empty(&options.client_custom_message) {
            set.insert(headers::CLIENT_CUSTOM_MESSAGE, message)?;
        }

        Ok(set)
    }

    /// Default headers plus `Authorization`
    ///
    /// # Errors
    /// [`AppError::InvalidInput`] if the token cannot be sent as a header value
    pub fn authenticated(&self, token: Option<&AccessToken>) -> Result<HeaderSet, AppError> {
        self.build(&DEFAULT_HEADERS, token, &CallbackOptions::default(), false)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
