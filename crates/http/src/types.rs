//! Request and response bodies for the auth endpoints

use fitrack_core::User;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterRequest {
    /// Registration where the confirmation repeats the password
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email: email.into(),
            password_confirmation: password.clone(),
            password,
        }
    }
}

/// Token and user extracted from a login or registration response
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub token: String,
    pub user: Option<User>,
}

/// Result of a logout. Local state is always cleared, so this never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub success: bool,
    /// Whether the backend acknowledged the logout
    pub remote_acknowledged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_request_confirms_password() {
        let request = RegisterRequest::new("Ana", "ana@example.com", "s3cret");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "s3cret",
                "password_confirmation": "s3cret"
            })
        );
    }
}
