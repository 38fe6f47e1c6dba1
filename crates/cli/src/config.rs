//! CLI configuration

use anyhow::{Context, Result};
use fitrack_http::ClientConfig;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "fitrack.toml";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Everything a command needs to build its client
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    /// File holding the stored token and user
    pub credentials_path: PathBuf,
}

impl Settings {
    /// Resolve settings: defaults, then the config file, then `FITRACK_*`
    /// environment, then command line flags.
    pub fn load(
        config_path: Option<&Path>,
        api_url: Option<String>,
        state_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let config_path = config_path.map(Path::to_path_buf).or_else(default_config_file);

        let mut client = ClientConfig::load(config_path.as_deref()).with_context(|| {
            match &config_path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            }
        })?;

        if let Some(api_url) = api_url {
            client.api_url = api_url;
        }
        client.validate()?;

        let state_dir = state_dir.unwrap_or_else(default_state_dir);

        Ok(Self {
            client,
            credentials_path: state_dir.join(CREDENTIALS_FILE),
        })
    }
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fitrack")
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("fitrack").join(CONFIG_FILE))
        .filter(|path| path.exists())
}
