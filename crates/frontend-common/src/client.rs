//! Client construction for the browser

use crate::auth::BrowserSessionExpiry;
use crate::config::AuthConfig;
use crate::storage::BrowserStorage;
use fitrack_http::{AuthService, ClientError, FitrackClient};
use std::sync::Arc;

/// Client persisting into localStorage and redirecting to the login page on
/// a 401. Build it once at the application root and pass it down.
pub fn browser_client() -> Result<FitrackClient, ClientError> {
    let config = AuthConfig::client_config();
    config.validate()?;

    FitrackClient::builder()
        .config(&config)
        .store(Arc::new(BrowserStorage))
        .on_session_expired(Arc::new(BrowserSessionExpiry::new(AuthConfig::LOGIN_PATH)))
        .build()
}

/// [`AuthService`] over [`browser_client`]
pub fn browser_auth_service() -> Result<AuthService, ClientError> {
    browser_client().map(AuthService::new)
}
