use copyleaks_client::application::config::{Config, ProductType};
use copyleaks_client::constants::{DEFAULT_API_VERSION, DEFAULT_HOST};

#[test]
fn builtin_config_defaults() {
    let config = Config::builtin();
    assert_eq!(config.product, ProductType::Businesses);
    assert!(!config.sandbox);
    assert!(!config.strict_auth);
    assert!(config.token_path.is_none());
    assert!(!config.credentials.is_complete());
    assert_eq!(config.rest_api.scheme, "https");
    assert_eq!(config.rest_api.host, DEFAULT_HOST);
    assert_eq!(config.rest_api.version, DEFAULT_API_VERSION);
}

#[test]
fn builder_methods() {
    let config = Config::builtin()
        .with_product(ProductType::Academic)
        .with_sandbox(true)
        .with_strict_auth(true)
        .with_credentials("user@example.com", "key")
        .with_token_path("/tmp/token.json")
        .with_base_url("http://127.0.0.1:1234/");

    assert_eq!(config.product, ProductType::Academic);
    assert!(config.sandbox);
    assert!(config.strict_auth);
    assert!(config.credentials.is_complete());
    assert_eq!(config.token_path.as_deref(), Some("/tmp/token.json"));
    assert_eq!(config.rest_api.scheme, "http");
    assert_eq!(config.rest_api.host, "127.0.0.1:1234");
    assert_eq!(config.rest_api.version, DEFAULT_API_VERSION);
}

#[test]
fn product_type_parsing_and_routes() {
    assert_eq!("businesses".parse::<ProductType>(), Ok(ProductType::Businesses));
    assert_eq!(" Academic ".parse::<ProductType>(), Ok(ProductType::Academic));
    assert!("websites".parse::<ProductType>().is_err());
    assert_eq!(ProductType::Academic.as_route(), "academic");
    assert_eq!(ProductType::Businesses.to_string(), "businesses");
}

#[test]
fn config_display_hides_api_key() {
    let config = Config::builtin().with_credentials("user@example.com", "secret-key");
    let rendered = config.to_string();
    assert!(rendered.contains("user@example.com"));
    assert!(!rendered.contains("secret-key"));
}

#[test]
fn config_reads_environment() {
    unsafe {
        std::env::set_var("COPYLEAKS_PRODUCT", "academic");
        std::env::set_var("COPYLEAKS_SANDBOX", "true");
        std::env::set_var("COPYLEAKS_TIMEOUT", "5");
    }
    let config = Config::new();
    unsafe {
        std::env::remove_var("COPYLEAKS_PRODUCT");
        std::env::remove_var("COPYLEAKS_SANDBOX");
        std::env::remove_var("COPYLEAKS_TIMEOUT");
    }

    assert_eq!(config.product, ProductType::Academic);
    assert!(config.sandbox);
    assert_eq!(config.rest_api.timeout, 5);
}
