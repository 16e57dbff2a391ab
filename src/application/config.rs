use crate::constants::{DEFAULT_API_VERSION, DEFAULT_HOST, DEFAULT_SCHEME, DEFAULT_TIMEOUT_SECS};
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Copyleaks product the account is registered for
///
/// The product name is embedded in the route of every scan operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Copyleaks for businesses
    #[default]
    Businesses,
    /// Copyleaks for education
    Academic,
}

impl ProductType {
    /// Route segment of the product
    #[must_use]
    pub fn as_route(&self) -> &'static str {
        match self {
            ProductType::Businesses => "businesses",
            ProductType::Academic => "academic",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_route())
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "businesses" | "business" => Ok(ProductType::Businesses),
            "academic" | "education" => Ok(ProductType::Academic),
            other => Err(format!("unknown product type: {other}")),
        }
    }
}

#[derive(DisplaySimple, Serialize, Deserialize, Clone, Default, PartialEq)]
/// Credentials used by [`Client::login_with_config`](crate::application::client::Client::login_with_config)
pub struct Credentials {
    /// Account email
    pub email: String,
    /// API key from the Copyleaks dashboard, never serialized
    #[serde(default, skip_serializing)]
    pub api_key: String,
}

impl Credentials {
    /// Returns true when both fields are filled in
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("api_key", &"***")
            .finish()
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Location of the REST API
pub struct RestApiConfig {
    /// URL scheme, `https` in production
    pub scheme: String,
    /// API host
    pub host: String,
    /// Versioned path segment
    pub version: String,
    /// Timeout in seconds for REST API requests
    pub timeout: u64,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
/// Main configuration of the Copyleaks client
///
/// Each [`Client`](crate::application::client::Client) owns its configuration, so
/// differently configured clients can coexist in one process.
pub struct Config {
    /// Credentials, used when the client logs in on its own
    pub credentials: Credentials,
    /// REST API location
    pub rest_api: RestApiConfig,
    /// Product embedded in scan routes
    pub product: ProductType,
    /// Sends `copyleaks-sandbox-mode` on scan creation requests
    pub sandbox: bool,
    /// Fail authenticated calls locally when no token is stored
    pub strict_auth: bool,
    /// File used to persist the access token, in memory only when `None`
    pub token_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration from the environment
    ///
    /// A `.env` file is loaded first when present. Recognised variables:
    /// `COPYLEAKS_EMAIL`, `COPYLEAKS_API_KEY`, `COPYLEAKS_PRODUCT`,
    /// `COPYLEAKS_SANDBOX`, `COPYLEAKS_STRICT_AUTH`, `COPYLEAKS_SCHEME`,
    /// `COPYLEAKS_HOST`, `COPYLEAKS_API_VERSION`, `COPYLEAKS_TIMEOUT` and
    /// `COPYLEAKS_TOKEN_PATH`.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let credentials = Credentials {
            email: get_env_or_default("COPYLEAKS_EMAIL", String::new()),
            api_key: get_env_or_default("COPYLEAKS_API_KEY", String::new()),
        };
        if !credentials.is_complete() {
            warn!("COPYLEAKS_EMAIL or COPYLEAKS_API_KEY not set, explicit login required");
        }

        Config {
            credentials,
            rest_api: RestApiConfig {
                scheme: get_env_or_default("COPYLEAKS_SCHEME", DEFAULT_SCHEME.to_string()),
                host: get_env_or_default("COPYLEAKS_HOST", DEFAULT_HOST.to_string()),
                version: get_env_or_default(
                    "COPYLEAKS_API_VERSION",
                    DEFAULT_API_VERSION.to_string(),
                ),
                timeout: get_env_or_default("COPYLEAKS_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
            product: get_env_or_default("COPYLEAKS_PRODUCT", ProductType::Businesses),
            sandbox: get_env_or_default("COPYLEAKS_SANDBOX", false),
            strict_auth: get_env_or_default("COPYLEAKS_STRICT_AUTH", false),
            token_path: get_env_or_none("COPYLEAKS_TOKEN_PATH"),
        }
    }

    /// Configuration with built-in defaults, ignoring the environment
    #[must_use]
    pub fn builtin() -> Self {
        Config {
            credentials: Credentials::default(),
            rest_api: RestApiConfig::default(),
            product: ProductType::default(),
            sandbox: false,
            strict_auth: false,
            token_path: None,
        }
    }

    /// Sets the product
    #[must_use]
    pub fn with_product(mut self, product: ProductType) -> Self {
        self.product = product;
        self
    }

    /// Enables or disables sandbox mode
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Enables or disables local rejection of unauthenticated calls
    #[must_use]
    pub fn with_strict_auth(mut self, strict_auth: bool) -> Self {
        self.strict_auth = strict_auth;
        self
    }

    /// Sets the credentials
    #[must_use]
    pub fn with_credentials(mut self, email: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.credentials = Credentials {
            email: email.into(),
            api_key: api_key.into(),
        };
        self
    }

    /// Points the client at another base URL, e.g. a local mock server
    ///
    /// `base_url` is `scheme://host[:port]`; the version segment is kept.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let (scheme, host) = base_url
            .split_once("://")
            .unwrap_or((DEFAULT_SCHEME, base_url));
        self.rest_api.scheme = scheme.to_string();
        self.rest_api.host = host.trim_end_matches('/').to_string();
        self
    }

    /// Sets the token file
    #[must_use]
    pub fn with_token_path(mut self, path: impl Into<String>) -> Self {
        self.token_path = Some(path.into());
        self
    }
}
