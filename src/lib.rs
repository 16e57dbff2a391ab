/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Copyleaks Client
//!
//! An async client for the Copyleaks plagiarism detection REST API.
//!
//! The crate is split in layers:
//! - [`model`]: request construction, multipart encoding and request execution
//! - [`application`]: configuration, access token handling, header composition and
//!   the endpoint facade ([`application::client::Client`])
//! - [`utils`]: environment helpers, logging setup and request ids
//!
//! # Example
//! ```ignore
//! use copyleaks_client::prelude::*;
//!
//! let client = Client::new(Config::new())?;
//! client.login("user@example.com", "api-key").await?;
//! let process = client
//!     .create_by_url("https://example.com/doc", &CallbackOptions::default())
//!     .await?;
//! ```

/// Application layer: configuration, authentication, headers and the API facade
pub mod application;
/// Global constants
pub mod constants;
/// Error types
pub mod error;
/// Request models, multipart encoding and HTTP execution
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// Utility helpers
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
