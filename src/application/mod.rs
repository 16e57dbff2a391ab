/// Access token provider and persistence
pub mod auth;
/// Copyleaks API client
pub mod client;
/// Application configuration module
pub mod config;
/// Header composition
pub mod headers;
/// Service interfaces
pub mod interfaces;
