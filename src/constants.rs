/// URL scheme used for every API request
pub const DEFAULT_SCHEME: &str = "https";
/// Host of the Copyleaks REST API
pub const DEFAULT_HOST: &str = "api.copyleaks.com";
/// Versioned path segment placed between the host and the route
pub const DEFAULT_API_VERSION: &str = "v1";
/// Default timeout in seconds for REST API requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// User agent string used in HTTP requests to identify this client to the Copyleaks API
pub const USER_AGENT: &str = concat!("copyleaks-client-rs/", env!("CARGO_PKG_VERSION"));

/// Scheme prefix of the `Authorization` header value
pub const AUTHORIZATION_SCHEME: &str = "Bearer";
/// Safety margin in seconds applied when checking token expiry
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 300;

/// Namespace prefix of generated multipart boundaries
pub const BOUNDARY_PREFIX: &str = "copyleaks.boundary.";
/// MIME type used when an extension cannot be resolved
pub const DEFAULT_MIME_TYPE: &str = content_types::OCTET_STREAM;
/// Placeholder filename for uploads without a name
pub const DEFAULT_UPLOAD_FILENAME: &str = "file";
/// Line length of wrapped base64 upload payloads
pub const BASE64_LINE_LENGTH: usize = 64;

/// Maximum number of locales advertised in `Accept-Language`
pub const MAX_ACCEPT_LANGUAGES: usize = 6;
/// `Accept-Language` value used when no locale can be detected
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US;q=1.0";

/// Standard and vendor header names
pub mod headers {
    /// Authorization header
    pub const AUTHORIZATION: &str = "Authorization";
    /// Content type header
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// Content length header
    pub const CONTENT_LENGTH: &str = "Content-Length";
    /// Cache control header
    pub const CACHE_CONTROL: &str = "Cache-Control";
    /// User agent header
    pub const USER_AGENT: &str = "User-Agent";
    /// Accept language header
    pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
    /// Accept header
    pub const ACCEPT: &str = "Accept";
    /// Runs the request against the sandbox, no credits consumed
    pub const SANDBOX_MODE: &str = "copyleaks-sandbox-mode";
    /// Scans part of the content when credits are insufficient
    pub const ALLOW_PARTIAL_SCAN: &str = "copyleaks-allow-partial-scan";
    /// URL notified when the process completes
    pub const HTTP_CALLBACK: &str = "copyleaks-http-callback";
    /// Email address notified when the process completes
    pub const EMAIL_CALLBACK: &str = "copyleaks-email-callback";
    /// Free-form payload echoed back with the results
    pub const CLIENT_CUSTOM_MESSAGE: &str = "copyleaks-client-custom-message";
}

/// Content type values
pub mod content_types {
    /// JSON body
    pub const JSON: &str = "application/json";
    /// Raw text body
    pub const TEXT: &str = "text/plain";
    /// Raw bytes body
    pub const OCTET_STREAM: &str = "application/octet-stream";
    /// Multipart body, completed with `;boundary=...`
    pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
}

/// Value of the `Cache-Control` default header
pub const CACHE_CONTROL_VALUE: &str = "no-cache";
