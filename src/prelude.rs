/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Copyleaks Client Prelude
//!
//! Imports the types needed for most interactions with the Copyleaks API.
//!
//! ## Usage
//!
//! ```rust
//! use copyleaks_client::prelude::*;
//!
//! let config = Config::builtin().with_product(ProductType::Academic);
//! let options = CallbackOptions::new().with_allow_partial_scan(true);
//! # let _ = (config, options);
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the Copyleaks client
pub use crate::application::config::{Config, Credentials, ProductType, RestApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// AUTHENTICATION
// ============================================================================

/// Access token and its persistence
pub use crate::application::auth::{
    AccessToken, AuthTokenProvider, FileTokenStore, MemoryTokenStore, TokenStore,
};

// ============================================================================
// CLIENT AND SERVICES
// ============================================================================

/// API client
pub use crate::application::client::Client;

/// Scan service trait
pub use crate::application::interfaces::scan::ScanService;

/// Header composition
pub use crate::application::headers::{CallbackOptions, HeaderBuilder, default_headers};

// ============================================================================
// REQUESTS AND TRANSPORT
// ============================================================================

/// Request construction
pub use crate::model::http::{HeaderSet, NetworkRequest, RequestBuilder, RequestSpec};

/// Request execution
pub use crate::model::executor::{
    RawResponse, ReqwestTransport, RequestExecutor, RequestHandle, Transport,
};

/// Multipart uploads
pub use crate::model::multipart::{
    MultipartBody, MultipartEncoder, MultipartFile, PayloadEncoding,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;
pub use std::sync::Arc;
pub use tracing::{debug, error, info, warn};

/// Re-export reqwest for HTTP operations (if needed for custom transports)
pub use reqwest::{Method, StatusCode};
