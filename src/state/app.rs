/// Top-level dashboard state
///
/// `AppState` is owned by the iced application and is the only mutable state
/// in the program. Its methods never touch the network: they return a
/// `Request` describing the call the shell should make, and take the result
/// back through another method once the call finishes.

use tracing::{debug, info, warn};

use super::data::{ImageSource, UserRecord};
use super::directory::{Directory, DirectoryStatus};
use super::session::{Authenticated, Session};
use super::token_store::TokenStore;
use crate::api::Credentials;
use crate::error::Result;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    LoggedOut,
    LoggedIn(DirectoryPhase),
}

/// Logged-in sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryPhase {
    Loading,
    Loaded,
    Error,
    ImageOverlayOpen,
}

/// A network call the shell must issue on behalf of the state.
///
/// `epoch` ties the result back to the session that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Directory { token: String, epoch: u64 },
    Images { user_id: i64, token: String, epoch: u64 },
}

#[derive(Debug, Default)]
pub struct AppState {
    session: Session,
    directory: Directory,
    /// Bumped on every login and logout; results from an older epoch are stale
    epoch: u64,
}

impl AppState {
    /// Build the start-up state from a persisted token.
    /// A restored token goes straight to fetching the directory.
    pub fn restore(token: Option<String>) -> (Self, Option<Request>) {
        let mut state = AppState {
            session: Session::restored(token),
            ..Default::default()
        };

        let request = if state.session.is_logged_in() {
            info!("Restored saved session");
            state.request_directory()
        } else {
            None
        };

        (state, request)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn view_state(&self) -> ViewState {
        if !self.session.is_logged_in() {
            return ViewState::LoggedOut;
        }

        let phase = if self.directory.overlay().visible {
            DirectoryPhase::ImageOverlayOpen
        } else {
            match self.directory.status() {
                DirectoryStatus::Idle | DirectoryStatus::Loading => DirectoryPhase::Loading,
                DirectoryStatus::Loaded => DirectoryPhase::Loaded,
                DirectoryStatus::Failed => DirectoryPhase::Error,
            }
        };
        ViewState::LoggedIn(phase)
    }

    /// Validated credentials for a login request, if one may start now
    pub fn begin_login(&mut self) -> Option<Credentials> {
        self.session.begin_submit()
    }

    /// Apply a login result. On success the token is persisted and the
    /// directory fetch is requested.
    pub fn complete_login(&mut self, result: Result<Authenticated>, store: &TokenStore) -> Option<Request> {
        let token = self.session.finish_submit(result)?;
        self.epoch += 1;
        self.directory.reset();

        if let Err(e) = store.save(&token) {
            warn!("Could not save session token to {}: {}", store.path().display(), e);
        }

        self.request_directory()
    }

    /// Ask for a (re)load of the directory. Needs a token and no fetch
    /// already in flight.
    pub fn request_directory(&mut self) -> Option<Request> {
        let token = self.session.token()?.to_string();
        if !self.directory.begin_load() {
            return None;
        }
        Some(Request::Directory {
            token,
            epoch: self.epoch,
        })
    }

    pub fn complete_directory(&mut self, epoch: u64, result: Result<Vec<UserRecord>>) {
        if self.is_stale(epoch) {
            return;
        }
        self.directory.apply_users(result);
    }

    /// Ask for one user's images. Needs a token and a loaded directory.
    pub fn request_images(&mut self, user_id: i64) -> Option<Request> {
        let token = self.session.token()?.to_string();
        if !self.directory.begin_images(user_id) {
            return None;
        }
        Some(Request::Images {
            user_id,
            token,
            epoch: self.epoch,
        })
    }

    pub fn complete_images(&mut self, epoch: u64, user_id: i64, result: Result<Vec<ImageSource>>) {
        if self.is_stale(epoch) {
            return;
        }
        self.directory.apply_images(user_id, result);
    }

    pub fn dismiss_images(&mut self) {
        self.directory.dismiss_images();
    }

    /// Clear the token, the form and the directory. Idempotent.
    pub fn logout(&mut self, store: &TokenStore) {
        if self.session.is_logged_in() {
            info!("Signing out");
        }
        self.epoch += 1;
        self.session.clear();
        self.directory.reset();

        if let Err(e) = store.clear() {
            warn!("Could not remove session token at {}: {}", store.path().display(), e);
        }
    }

    fn is_stale(&self, epoch: u64) -> bool {
        let stale = epoch != self.epoch || !self.session.is_logged_in();
        if stale {
            debug!("Dropping result from epoch {} (current {})", epoch, self.epoch);
        }
        stale
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::api::ImagePayload;
    use crate::error::DashboardError;
    use crate::state::data::fixtures::{png_payload, user};
    use crate::state::directory::{fetch_directory, fetch_user_images};
    use crate::state::session::submit_login;

    fn store() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token"));
        (dir, store)
    }

    fn logged_in(users: Vec<UserRecord>) -> AppState {
        let (mut state, request) = AppState::restore(Some("T".into()));
        let Some(Request::Directory { epoch, .. }) = request else {
            panic!("restore should request the directory");
        };
        state.complete_directory(epoch, Ok(users));
        state
    }

    /// Run a request against the fake and feed the result back
    async fn run(state: &mut AppState, api: &Arc<FakeApi>, request: Request) {
        match request {
            Request::Directory { token, epoch } => {
                let result = fetch_directory(api.clone(), token).await;
                state.complete_directory(epoch, result);
            }
            Request::Images { user_id, token, epoch } => {
                let result = fetch_user_images(api.clone(), user_id, token).await;
                state.complete_images(epoch, user_id, result);
            }
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_fetches_directory() {
        let (_dir, store) = store();
        let api = Arc::new(
            FakeApi::new()
                .with_login("admin", "T")
                .with_users(vec![user(1, "Admin", 0, 150), user(2, "USER", 3, 10)]),
        );
        let (mut state, request) = AppState::restore(None);
        assert!(request.is_none());
        assert_eq!(state.view_state(), ViewState::LoggedOut);

        state.session_mut().email = "a@b.com".into();
        state.session_mut().password = "pw".into();
        let credentials = state.begin_login().unwrap();
        let result = submit_login(api.clone(), credentials).await;
        let request = state.complete_login(result, &store).unwrap();

        assert_eq!(state.session().token(), Some("T"));
        assert_eq!(store.load().unwrap().as_deref(), Some("T"));
        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Loading));
        assert!(matches!(&request, Request::Directory { token, .. } if token == "T"));

        run(&mut state, &api, request).await;

        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Loaded));
        assert_eq!(state.directory().users().len(), 2);
        assert_eq!(
            api.calls(),
            vec![
                Call::Login { email: "a@b.com".into() },
                Call::ListUsers { token: "T".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_credentials_never_reach_the_network() {
        let api = Arc::new(FakeApi::new().with_login("admin", "T"));
        let (mut state, _) = AppState::restore(None);

        state.session_mut().email = "a@b.com".into();
        assert!(state.begin_login().is_none());
        assert_eq!(state.session().last_error(), Some("Email and password are required"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unprivileged_login_stores_nothing() {
        let (_dir, store) = store();
        let api = Arc::new(FakeApi::new().with_login("USER", "T"));
        let (mut state, _) = AppState::restore(None);

        state.session_mut().email = "a@b.com".into();
        state.session_mut().password = "pw".into();
        let credentials = state.begin_login().unwrap();
        let result = submit_login(api.clone(), credentials).await;
        assert!(state.complete_login(result, &store).is_none());

        assert_eq!(state.view_state(), ViewState::LoggedOut);
        assert_eq!(state.session().last_error(), Some("Unauthorized role"));
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_directory_error_phase() {
        let (mut state, request) = AppState::restore(Some("T".into()));
        let Some(Request::Directory { epoch, .. }) = request else {
            panic!("expected directory request");
        };
        state.complete_directory(epoch, Err(DashboardError::status(403, "Forbidden")));

        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Error));
        assert!(state.request_images(1).is_none());
    }

    #[tokio::test]
    async fn test_image_overlay_round_trip() {
        let api = Arc::new(FakeApi::new().with_images(1, Ok(vec![ImagePayload { image: png_payload() }])));
        let mut state = logged_in(vec![user(1, "USER", 0, 0)]);

        let request = state.request_images(1).unwrap();
        run(&mut state, &api, request).await;
        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::ImageOverlayOpen));

        state.dismiss_images();
        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Loaded));
    }

    #[test]
    fn test_logout_from_any_state_is_idempotent() {
        let (_dir, store) = store();
        store.save("T").unwrap();
        let mut state = logged_in(vec![user(1, "USER", 0, 0)]);
        assert!(state.request_images(1).is_some());

        state.logout(&store);
        assert_eq!(state.view_state(), ViewState::LoggedOut);
        assert!(state.session().token().is_none());
        assert!(state.directory().users().is_empty());
        assert_eq!(store.load().unwrap(), None);

        state.logout(&store);
        assert_eq!(state.view_state(), ViewState::LoggedOut);

        let (mut fresh, _) = AppState::restore(None);
        fresh.logout(&store);
        assert_eq!(fresh.view_state(), ViewState::LoggedOut);
    }

    #[test]
    fn test_results_after_logout_are_dropped() {
        let (_dir, store) = store();
        let (mut state, request) = AppState::restore(Some("T".into()));
        let Some(Request::Directory { epoch, .. }) = request else {
            panic!("expected directory request");
        };

        state.logout(&store);
        state.complete_directory(epoch, Ok(vec![user(1, "USER", 0, 0)]));

        assert!(state.directory().users().is_empty());
        assert_eq!(state.view_state(), ViewState::LoggedOut);
    }

    #[tokio::test]
    async fn test_refresh_abandons_image_request() {
        let api = Arc::new(FakeApi::new().with_images(1, Ok(vec![ImagePayload { image: png_payload() }])));
        let mut state = logged_in(vec![user(1, "USER", 0, 0)]);

        let images = state.request_images(1).unwrap();
        let Some(Request::Directory { epoch, .. }) = state.request_directory() else {
            panic!("refresh should be allowed while images load");
        };
        state.complete_directory(epoch, Err(DashboardError::network("refused")));
        run(&mut state, &api, images).await;

        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Error));
        assert!(!state.directory().overlay().visible);
        assert_eq!(state.directory().error(), Some("Failed to fetch users"));
    }

    #[tokio::test]
    async fn test_refresh_recovers_from_error() {
        let api = Arc::new(FakeApi::new().with_users(vec![user(2, "Admin", 0, 150), user(3, "USER", 1, 7)]));
        let (mut state, request) = AppState::restore(Some("T".into()));
        let Some(Request::Directory { epoch, .. }) = request else {
            panic!("expected directory request");
        };
        state.complete_directory(epoch, Err(DashboardError::status(500, "boom")));
        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Error));

        let request = state.request_directory().unwrap();
        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Loading));
        assert!(state.request_directory().is_none());

        run(&mut state, &api, request).await;

        assert_eq!(state.view_state(), ViewState::LoggedIn(DirectoryPhase::Loaded));
        assert!(state.directory().error().is_none());
        let ids: Vec<i64> = state.directory().users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(api.calls(), vec![Call::ListUsers { token: "T".into() }]);
    }

    #[test]
    fn test_no_requests_without_token() {
        let (mut state, _) = AppState::restore(None);
        assert!(state.request_directory().is_none());
        assert!(state.request_images(1).is_none());
    }
}
