//! Browser reaction to a rejected credential

use super::error_handler::trigger_session_expired;
use fitrack_http::SessionExpiredHandler;
use tracing::debug;

/// Notifies the auth context and sends the browser to the login page.
///
/// Installed on the client by [`browser_client`](crate::browser_client). The
/// credential store has already been cleared when this runs.
#[derive(Debug, Clone)]
pub struct BrowserSessionExpiry {
    login_path: String,
}

impl BrowserSessionExpiry {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }
}

impl SessionExpiredHandler for BrowserSessionExpiry {
    fn on_session_expired(&self) {
        if !trigger_session_expired() {
            debug!("No auth provider mounted");
        }

        #[cfg(target_arch = "wasm32")]
        redirect_to(&self.login_path);
        #[cfg(not(target_arch = "wasm32"))]
        debug!(path = %self.login_path, "No browser to redirect");
    }
}

#[cfg(target_arch = "wasm32")]
fn redirect_to(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();

    if location.pathname().is_ok_and(|current| current == path) {
        return;
    }

    if let Err(e) = location.set_href(path) {
        tracing::warn!(error = ?e, path, "Failed to navigate to login page");
    }
}
