use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Identifier assigned by the backend. Numeric on most deployments, but
/// some return string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// Snapshot of the signed-in user as returned by the backend.
///
/// Cached next to the token; the backend stays the source of truth.
///
/// Deserialization never rejects an object: `roles` may be a single string
/// or a list, and a known field whose value has an unexpected shape is kept
/// in `extra` instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, JsonValue>")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    /// Fields the client does not model, kept so the cached copy round-trips.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// `roles` as sent by backends that return a bare string
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(roles: OneOrMany) -> Self {
        match roles {
            OneOrMany::One(role) => vec![role],
            OneOrMany::Many(roles) => roles,
        }
    }
}

/// Remove `key` and decode it; a value that does not fit goes back in place
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, JsonValue>, key: &str) -> Option<T> {
    let value = fields.remove(key)?;
    if value.is_null() {
        return None;
    }

    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            fields.insert(key.to_string(), value);
            None
        }
    }
}

impl From<Map<String, JsonValue>> for User {
    fn from(mut fields: Map<String, JsonValue>) -> Self {
        Self {
            id: take_field(&mut fields, "id"),
            name: take_field(&mut fields, "name"),
            email: take_field(&mut fields, "email"),
            role: take_field(&mut fields, "role"),
            roles: take_field::<OneOrMany>(&mut fields, "roles").map(Vec::from),
            extra: fields,
        }
    }
}

impl User {
    /// Check whether the user holds `role`
    pub fn has_role(&self, role: &str) -> bool {
        self.has_any_role(&[role])
    }

    /// Check whether the user holds at least one of `roles`.
    ///
    /// A list-valued `roles` field takes precedence over the single `role`
    /// field. An empty request never matches.
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        if let Some(held) = &self.roles {
            return roles
                .iter()
                .any(|wanted| held.iter().any(|r| r == wanted.as_ref()));
        }

        match &self.role {
            Some(held) => roles.iter().any(|wanted| held == wanted.as_ref()),
            None => false,
        }
    }

    /// Name to show in UI and CLI output
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

/// Token plus the cached user it was issued for
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub token: String,
    pub user: Option<User>,
}

impl Credential {
    /// Create a credential
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}
