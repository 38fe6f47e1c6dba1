//! Fitrack HTTP client
//!
//! A single configured client carries the base URL, the default JSON headers
//! and two interception points: outgoing requests pick up the bearer token
//! from the [`CredentialStore`], and a 401 on any response clears that store
//! and notifies the installed [`SessionExpiredHandler`].

pub mod auth;
pub mod config;
pub mod error;
pub mod exercises;
pub mod negotiate;
pub mod programs;
pub mod sessions;
pub mod users;

use arc_swap::ArcSwapOption;
use self::config::ClientConfig;
use self::error::ClientError;
use fitrack_core::{CredentialStore, KeyValueStore, MemoryStore};
use reqwest::{Client, ClientBuilder, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Reaction to the server rejecting the stored credential.
///
/// Runs after the credential store has been cleared. The browser build
/// navigates to the login page; the CLI prints a hint.
pub trait SessionExpiredHandler: Send + Sync {
    fn on_session_expired(&self);
}

/// Fitrack API client
#[derive(Clone)]
pub struct FitrackClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: Client,
    base_url: String,
    credentials: CredentialStore,
    default_token: ArcSwapOption<String>,
    on_session_expired: Option<Arc<dyn SessionExpiredHandler>>,
}

/// Response bodies come either bare or wrapped as `{ "data": ... }`
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

impl FitrackClient {
    /// Create a new client with default configuration and in-memory
    /// credentials
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> FitrackClientBuilder {
        FitrackClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Whether both handles share the same underlying client
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Store the bearer token is read from
    pub fn credentials(&self) -> &CredentialStore {
        &self.inner.credentials
    }

    /// Token attached when the credential store has none
    pub fn default_token(&self) -> Option<String> {
        self.inner
            .default_token
            .load_full()
            .map(|token| token.as_ref().clone())
    }

    pub fn set_default_token(&self, token: &str) {
        self.inner.default_token.store(Some(Arc::new(token.to_string())));
    }

    pub fn clear_default_token(&self) {
        self.inner.default_token.store(None);
    }

    /// Token the next request will carry
    pub fn bearer_token(&self) -> Option<String> {
        self.inner
            .credentials
            .token()
            .or_else(|| self.default_token())
    }

    /// Create a request builder with authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        let request = self.inner.client.request(method, url);

        match self.bearer_token() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    /// Execute a request and decode the JSON body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request whose body may be wrapped in a `data` envelope
    pub async fn execute_data<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let envelope: Envelope<T> = self.execute(request).await?;
        Ok(envelope.into_inner())
    }

    /// Execute a request and return the raw body
    pub async fn execute_text(&self, request: reqwest::RequestBuilder) -> Result<String, ClientError> {
        let response = self.send(request).await?;
        Ok(response.text().await?)
    }

    /// Execute a request and discard the body
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        self.intercept_response(response).await
    }

    async fn intercept_response(&self, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        let error = ClientError::from_status(status, message);

        if error.is_auth_expired() {
            self.expire_session();
        }

        Err(error)
    }

    /// Drop every trace of the current credential and notify the handler
    fn expire_session(&self) {
        warn!("Server rejected credential, clearing local session");

        if let Err(e) = self.inner.credentials.clear() {
            warn!(error = %e, "Failed to clear stored credential");
        }
        self.clear_default_token();

        if let Some(handler) = &self.inner.on_session_expired {
            handler.on_session_expired();
        }
    }
}

impl std::fmt::Debug for FitrackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitrackClient")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials)
            .finish_non_exhaustive()
    }
}

/// Builder for `FitrackClient`
#[derive(Default)]
pub struct FitrackClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    store: Option<Arc<dyn KeyValueStore>>,
    on_session_expired: Option<Arc<dyn SessionExpiredHandler>>,
}

impl FitrackClientBuilder {
    /// Take base URL, timeout and user agent from a loaded config
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = Some(config.api_url.clone());
        self.timeout = config.timeout();
        self.user_agent = Some(config.user_agent.clone());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Persistence used for the token and cached user
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Install the reaction to a 401
    pub fn on_session_expired(mut self, handler: Arc<dyn SessionExpiredHandler>) -> Self {
        self.on_session_expired = Some(handler);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FitrackClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut client_builder = ClientBuilder::new().default_headers(headers);

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout; // Timeouts not supported on WASM

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("fitrack-client/{}", env!("CARGO_PKG_VERSION")));
        client_builder = client_builder.user_agent(user_agent);

        let client = client_builder.build()?;

        let store = self.store.unwrap_or_else(|| {
            debug!("No credential backend configured, using in-memory store");
            Arc::new(MemoryStore::new())
        });
        let credentials = CredentialStore::new(store);

        // Carry a token persisted by an earlier run
        let default_token = ArcSwapOption::new(credentials.token().map(Arc::new));

        Ok(FitrackClient {
            inner: Arc::new(ClientInner {
                client,
                base_url,
                credentials,
                default_token,
                on_session_expired: self.on_session_expired,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitrack_core::User;

    #[test]
    fn test_builder_requires_base_url() {
        let result = FitrackClient::builder().build();
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = FitrackClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_stored_token_becomes_default_header() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        CredentialStore::new(store.clone())
            .save("persisted", Some(&User::default()))
            .unwrap();

        let client = FitrackClient::builder()
            .base_url("http://localhost:8000/api")
            .store(store)
            .build()
            .unwrap();

        assert_eq!(client.default_token(), Some("persisted".to_string()));
        assert_eq!(client.bearer_token(), Some("persisted".to_string()));
    }

    #[test]
    fn test_bearer_token_prefers_store() {
        let client = FitrackClient::new("http://localhost:8000/api").unwrap();
        assert_eq!(client.bearer_token(), None);

        client.set_default_token("from-header");
        assert_eq!(client.bearer_token(), Some("from-header".to_string()));

        client.credentials().save("from-store", None).unwrap();
        assert_eq!(client.bearer_token(), Some("from-store".to_string()));
    }

    #[test]
    fn test_envelope_accepts_both_shapes() {
        let wrapped: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);

        let bare: Envelope<Vec<u32>> = serde_json::from_str("[3]").unwrap();
        assert_eq!(bare.into_inner(), vec![3]);
    }
}
