//! Persisted bearer token and cached user

use crate::storage::KeyValueStore;
use crate::types::{Credential, User};
use crate::CoreResult;
use std::sync::Arc;
use tracing::warn;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-serialized user
pub const USER_KEY: &str = "user";

/// Holder for the current credential.
///
/// Only the auth layer writes through this type; everything else reads.
/// A user is never observable without a token: `save` writes the token
/// first and `clear` removes the user first.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Replace any prior credential.
    ///
    /// The previous user is removed before the new token lands, so a token
    /// is never paired with another account's user. If the new user cannot
    /// be written, nothing is left stored.
    pub fn save(&self, token: &str, user: Option<&User>) -> CoreResult<()> {
        let serialized = user.map(serde_json::to_string).transpose()?;

        self.backend.delete(USER_KEY)?;
        self.backend.set(TOKEN_KEY, token)?;

        if let Some(serialized) = serialized
            && let Err(e) = self.backend.set(USER_KEY, &serialized)
        {
            if let Err(clear_err) = self.clear() {
                warn!(error = %clear_err, "Failed to roll back partially saved credential");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove both token and user
    pub fn clear(&self) -> CoreResult<()> {
        self.backend.delete(USER_KEY)?;
        self.backend.delete(TOKEN_KEY)
    }

    /// Current token. Empty strings count as absent.
    pub fn token(&self) -> Option<String> {
        match self.backend.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// Cached user, `None` when there is no token or the cached copy is
    /// unreadable
    pub fn user(&self) -> Option<User> {
        self.token()?;

        let raw = match self.backend.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read stored user");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cached user");
                None
            }
        }
    }

    /// Token and user together, if signed in
    pub fn credential(&self) -> Option<Credential> {
        let token = self.token()?;
        Some(Credential::new(token, self.user()))
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("has_token", &self.has_token())
            .finish()
    }
}
