//! Authentication service
//!
//! Sole writer of the credential store. Built explicitly from a
//! [`FitrackClient`]; there is no process-wide instance and no lazy setup.

use super::negotiate::negotiate_auth_response;
use super::{ClientError, FitrackClient};
use crate::types::{AuthSession, LoginRequest, LogoutOutcome, RegisterRequest};
use fitrack_core::User;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const LOGOUT_PATH: &str = "/auth/logout";
const ME_PATH: &str = "/auth/me";

/// Login, registration and session queries over a [`FitrackClient`]
#[derive(Clone, Debug)]
pub struct AuthService {
    client: FitrackClient,
}

impl AuthService {
    pub fn new(client: FitrackClient) -> Self {
        Self { client }
    }

    /// Client the service authenticates
    pub fn client(&self) -> &FitrackClient {
        &self.client
    }

    /// Sign in with email and password
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthSession, ClientError> {
        let session = self.authenticate(LOGIN_PATH, credentials).await?;
        info!("Signed in");
        Ok(session)
    }

    /// Create an account and sign in with it
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register(
        &self,
        registration: &RegisterRequest,
    ) -> Result<AuthSession, ClientError> {
        let session = self.authenticate(REGISTER_PATH, registration).await?;
        info!("Registered and signed in");
        Ok(session)
    }

    /// Shared by login and register: post, negotiate the response shape,
    /// then persist. Nothing is written unless a token was found in a JSON
    /// body.
    async fn authenticate<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<AuthSession, ClientError> {
        let request = self.client.request(Method::POST, path).json(body);
        let raw = self.client.execute_text(request).await?;
        let response: Value = serde_json::from_str(&raw)
            .map_err(|e| ClientError::Authentication(format!("malformed auth response: {e}")))?;

        let session = negotiate_auth_response(&response)?;

        if let Err(e) = self
            .client
            .credentials()
            .save(&session.token, session.user.as_ref())
        {
            // The store holds nothing now; drop any earlier session's header too
            self.client.clear_default_token();
            return Err(e.into());
        }
        self.client.set_default_token(&session.token);

        Ok(session)
    }

    /// Sign out.
    ///
    /// The backend is notified best-effort; local credentials are cleared
    /// whatever the outcome, so this always reports success.
    pub async fn logout(&self) -> LogoutOutcome {
        let request = self.client.request(Method::POST, LOGOUT_PATH);
        let remote_acknowledged = match self.client.execute_empty(request).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Remote logout failed, clearing local session anyway");
                false
            }
        };

        if let Err(e) = self.client.credentials().clear() {
            warn!(error = %e, "Failed to clear stored credential");
        }
        self.client.clear_default_token();
        info!("Signed out");

        LogoutOutcome {
            success: true,
            remote_acknowledged,
        }
    }

    /// Whether a token is stored.
    ///
    /// Re-applies the stored token to the client's default header, or drops a
    /// stale default header when nothing is stored.
    pub fn is_authenticated(&self) -> bool {
        match self.client.credentials().token() {
            Some(token) => {
                if self.client.default_token().as_deref() != Some(token.as_str()) {
                    debug!("Restoring default authorization header");
                    self.client.set_default_token(&token);
                }
                true
            }
            None => {
                if self.client.default_token().is_some() {
                    debug!("Dropping stale default authorization header");
                    self.client.clear_default_token();
                }
                false
            }
        }
    }

    /// Cached user, `None` when signed out or the cache is unreadable
    pub fn current_user(&self) -> Option<User> {
        self.client.credentials().user()
    }

    /// Whether the cached user holds `role`; false when signed out
    pub fn has_role(&self, role: &str) -> bool {
        self.has_any_role(&[role])
    }

    /// Whether the cached user holds any of `roles`; false when signed out
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        self.current_user()
            .is_some_and(|user| user.has_any_role(roles))
    }

    /// Fetch the signed-in user's profile from the server.
    ///
    /// Does not touch the cached copy.
    pub async fn me(&self) -> Result<User, ClientError> {
        let request = self.client.request(Method::GET, ME_PATH);
        self.client.execute_data(request).await
    }
}
