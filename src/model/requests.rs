/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

/// Body of the login request
#[derive(Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    /// Account email
    #[serde(rename = "Email")]
    pub email: String,
    /// API key from the Copyleaks dashboard
    #[serde(rename = "ApiKey")]
    pub api_key: String,
}

impl LoginRequest {
    /// Creates a login request
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("api_key", &"***")
            .finish()
    }
}

/// Body of the create-by-url request
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct CreateByUrlRequest {
    /// Public URL of the content to scan
    #[serde(rename = "Url")]
    pub url: String,
}

impl CreateByUrlRequest {
    /// Creates a create-by-url request
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
