//! Fitrack HTTP client
//!
//! Bearer-token client for the Fitrack API with the auth service that owns
//! the persisted session, plus typed endpoints for programs, training
//! sessions, exercises and users.

pub mod client;
pub mod types;

pub use client::auth::AuthService;
pub use client::config::{ClientConfig, DEFAULT_API_URL};
pub use client::error::ClientError;
pub use client::negotiate::negotiate_auth_response;
pub use client::users::NewUser;
pub use client::{FitrackClient, FitrackClientBuilder, SessionExpiredHandler};
pub use types::{AuthSession, LoginRequest, LogoutOutcome, RegisterRequest};
