//! Turning a login or registration response into an [`AuthSession`]
//!
//! Backends disagree on where the token lives. Accepted shapes, checked in
//! order:
//!
//! | token               | user                                   |
//! |---------------------|----------------------------------------|
//! | `token`             | `user`                                 |
//! | `access_token`      | `data.user`                            |
//! | `data.token`        | `data` itself, if it carries user data |
//! | `data.access_token` |                                        |

use super::ClientError;
use crate::types::AuthSession;
use fitrack_core::User;
use serde_json::{Map, Value};
use tracing::warn;

const TOKEN_FIELDS: [&str; 2] = ["token", "access_token"];
const USER_HINT_FIELDS: [&str; 3] = ["id", "email", "name"];

/// Extract token and user from an auth response body.
///
/// Fails with [`ClientError::Authentication`] when no token is present.
pub fn negotiate_auth_response(body: &Value) -> Result<AuthSession, ClientError> {
    let token = find_token(body).ok_or_else(|| {
        ClientError::Authentication("no recognizable token in response".to_string())
    })?;

    Ok(AuthSession {
        token,
        user: find_user(body),
    })
}

fn data_object(body: &Value) -> Option<&Map<String, Value>> {
    body.get("data").and_then(Value::as_object)
}

fn token_in(object: &Map<String, Value>) -> Option<String> {
    TOKEN_FIELDS.iter().find_map(|field| {
        object
            .get(*field)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

fn find_token(body: &Value) -> Option<String> {
    let top = body.as_object()?;
    token_in(top).or_else(|| data_object(body).and_then(token_in))
}

fn parse_user(value: &Value) -> Option<User> {
    match serde_json::from_value(value.clone()) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable user in auth response");
            None
        }
    }
}

fn find_user(body: &Value) -> Option<User> {
    if let Some(user) = body.get("user").filter(|v| v.is_object()) {
        return parse_user(user);
    }

    let data = data_object(body)?;

    if let Some(user) = data.get("user").filter(|v| v.is_object()) {
        return parse_user(user);
    }

    if USER_HINT_FIELDS.iter().any(|field| data.contains_key(*field)) {
        let mut user = data.clone();
        for field in TOKEN_FIELDS {
            user.remove(field);
        }
        return parse_user(&Value::Object(user));
    }

    None
}
