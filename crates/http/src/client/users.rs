//! User administration endpoints

use super::{ClientError, FitrackClient};
use fitrack_core::{User, UserId};
use reqwest::Method;
use serde::Serialize;

/// Payload for `POST /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl FitrackClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let request = self.request(Method::GET, "/users");
        self.execute_data(request).await
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User, ClientError> {
        let request = self.request(Method::GET, &format!("/users/{id}"));
        self.execute_data(request).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ClientError> {
        let request = self.request(Method::POST, "/users").json(user);
        self.execute_data(request).await
    }
}
