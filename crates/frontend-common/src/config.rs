//! Frontend configuration

use fitrack_http::{ClientConfig, DEFAULT_API_URL};

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Backend base URL, fixed at build time through `FITRACK_API_URL`
    pub const API_URL: &'static str = match option_env!("FITRACK_API_URL") {
        Some(url) => url,
        None => DEFAULT_API_URL,
    };

    /// Where an expired session sends the browser
    pub const LOGIN_PATH: &'static str = "/login";

    pub fn client_config() -> ClientConfig {
        ClientConfig::with_api_url(Self::API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_is_valid() {
        let config = AuthConfig::client_config();
        assert_eq!(config.api_url, AuthConfig::API_URL);
        assert!(config.validate().is_ok());
    }
}
