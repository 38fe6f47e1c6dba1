//! Client configuration

use super::ClientError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable prefix, e.g. `FITRACK_API_URL`
pub const ENV_PREFIX: &str = "FITRACK";

/// Connection settings for [`FitrackClient`](super::FitrackClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in seconds. Ignored in the browser.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("fitrack-client/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `api_url`, defaults elsewhere
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ClientError> {
        let url = url::Url::parse(&self.api_url).map_err(|e| {
            ClientError::Configuration(format!("invalid api_url '{}': {e}", self.api_url))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::Configuration(format!(
                "api_url must use http or https, got '{other}'"
            ))),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod load {
    use super::{ClientConfig, ENV_PREFIX};
    use config::{Config, ConfigError, Environment, File};
    use std::path::Path;

    impl ClientConfig {
        /// Load from defaults, then an optional TOML file, then the
        /// environment (which overrides the file)
        pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
            let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

            if let Some(path) = path {
                builder = builder.add_source(File::from(path));
            }

            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

            builder.build()?.try_deserialize()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(ClientConfig::with_api_url("not a url").validate().is_err());
        assert!(ClientConfig::with_api_url("ftp://example.com").validate().is_err());
        assert!(ClientConfig::with_api_url("https://api.example.com/v1").validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_url = \"https://fit.example.com/api\"\ntimeout_secs = 15").unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api_url, "https://fit.example.com/api");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.user_agent, default_user_agent());
    }
}
