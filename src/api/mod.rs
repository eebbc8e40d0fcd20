/// Remote admin API
///
/// `AdminApi` is the seam between the dashboard state and the network:
/// - `http.rs` - the real client over reqwest
/// - `fake.rs` - an in-memory double for tests

mod http;
#[cfg(test)]
pub mod fake;

pub use http::HttpApi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::state::data::UserRecord;

/// Validated login input.
///
/// Only `Credentials::new` builds one, so a login request can never be sent
/// with an empty field.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Both fields must contain something other than whitespace.
    /// The email is trimmed; the password is kept verbatim.
    pub fn new(email: &str, password: &str) -> Result<Self> {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            return Err(DashboardError::Validation);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful `POST /login`
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub role: String,
    pub token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_id: i64,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

/// One element of `GET /user/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagePayload {
    /// Base64-encoded image bytes
    pub image: String,
}

/// Operations the dashboard needs from the remote service
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `POST /login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// `GET /users` with a bearer token
    async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>>;

    /// `GET /user/{id}` with a bearer token
    async fn user_images(&self, user_id: i64, token: &str) -> Result<Vec<ImagePayload>>;
}
