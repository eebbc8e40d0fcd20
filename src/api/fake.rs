use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AdminApi, Credentials, ImagePayload, LoginResponse};
use crate::error::{DashboardError, Result};
use crate::state::data::UserRecord;

/// A request the fake received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login { email: String },
    ListUsers { token: String },
    UserImages { user_id: i64, token: String },
}

/// In-memory `AdminApi` with canned responses and a call log
pub struct FakeApi {
    login: Mutex<Result<LoginResponse>>,
    users: Mutex<Result<Vec<UserRecord>>>,
    images: Mutex<HashMap<i64, Result<Vec<ImagePayload>>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            login: Mutex::new(Err(DashboardError::status(401, "Invalid email or password"))),
            users: Mutex::new(Ok(Vec::new())),
            images: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_login(self, role: &str, token: &str) -> Self {
        *self.login.lock().unwrap() = Ok(LoginResponse {
            role: role.to_string(),
            token: token.to_string(),
            email: "a@b.com".to_string(),
            user_id: 1,
        });
        self
    }

    pub fn with_login_error(self, err: DashboardError) -> Self {
        *self.login.lock().unwrap() = Err(err);
        self
    }

    pub fn with_users(self, users: Vec<UserRecord>) -> Self {
        self.set_users(Ok(users));
        self
    }

    pub fn set_users(&self, users: Result<Vec<UserRecord>>) {
        *self.users.lock().unwrap() = users;
    }

    pub fn with_images(self, user_id: i64, images: Result<Vec<ImagePayload>>) -> Self {
        self.images.lock().unwrap().insert(user_id, images);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.record(Call::Login {
            email: credentials.email().to_string(),
        });
        self.login.lock().unwrap().clone()
    }

    async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>> {
        self.record(Call::ListUsers {
            token: token.to_string(),
        });
        self.users.lock().unwrap().clone()
    }

    async fn user_images(&self, user_id: i64, token: &str) -> Result<Vec<ImagePayload>> {
        self.record(Call::UserImages {
            user_id,
            token: token.to_string(),
        });
        self.images
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| Err(DashboardError::status(404, "User not found")))
    }
}
