/// Session controller
///
/// Owns the bearer token and the login form. The network half of login is
/// `submit_login`, an async function with no access to the form; the form
/// half (`begin_submit` / `finish_submit`) runs on the UI thread.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{AdminApi, Credentials};
use crate::display;
use crate::error::{DashboardError, Result};

/// Banner text when the login request itself fails
const LOGIN_FAILED: &str = "Login failed";

/// A privileged login the server accepted
#[derive(Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub token: String,
    pub email: String,
    pub user_id: i64,
}

impl std::fmt::Debug for Authenticated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticated")
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.token.is_some())
            .field("email", &self.email)
            .field("is_submitting", &self.is_submitting)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

/// Send the login request and check the returned role.
///
/// Non-privileged roles yield `Authorization` and their token is dropped
/// here, so it never reaches the session or the token store.
pub async fn submit_login(api: Arc<dyn AdminApi>, credentials: Credentials) -> Result<Authenticated> {
    let response = api.login(&credentials).await?;

    if !display::is_privileged(&response.role) {
        warn!("Login for {} rejected: role {:?} is not privileged", credentials.email(), response.role);
        return Err(DashboardError::Authorization {
            role: response.role,
        });
    }

    if response.token.trim().is_empty() {
        return Err(DashboardError::network("Login response did not include a token"));
    }

    Ok(Authenticated {
        token: response.token,
        email: if response.email.is_empty() {
            credentials.email().to_string()
        } else {
            response.email
        },
        user_id: response.user_id,
    })
}

/// Authentication token plus login-form state
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
    pub email: String,
    pub password: String,
    pub show_password: bool,
    is_submitting: bool,
    last_error: Option<String>,
}

impl Session {
    /// Start from a persisted token (blank tokens count as none)
    pub fn restored(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            ..Default::default()
        }
    }

    /// The active token. Never empty.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Validate the form and mark a submission in flight.
    ///
    /// Returns `None` when a submission is already running or when a field is
    /// empty; in the latter case the validation message becomes the error.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.is_submitting || self.is_logged_in() {
            return None;
        }

        match Credentials::new(&self.email, &self.password) {
            Ok(credentials) => {
                self.is_submitting = true;
                self.last_error = None;
                Some(credentials)
            }
            Err(e) => {
                self.last_error = Some(e.banner(LOGIN_FAILED));
                None
            }
        }
    }

    /// Apply the login outcome. Returns the new token on success.
    pub fn finish_submit(&mut self, result: Result<Authenticated>) -> Option<String> {
        self.is_submitting = false;

        match result {
            Ok(auth) => {
                info!("Signed in as {} (user {})", auth.email, auth.user_id);
                self.token = Some(auth.token.clone());
                self.password.clear();
                self.show_password = false;
                self.last_error = None;
                Some(auth.token)
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                self.last_error = Some(e.banner(LOGIN_FAILED));
                None
            }
        }
    }

    /// Forget the token and the credentials. Safe to call repeatedly.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
