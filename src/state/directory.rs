/// Directory view model
///
/// Holds the fetched user list and the per-user image overlay. Fetches are
/// plain async functions; their results are applied here once they land.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::data::{DirectoryStats, ImageSource, UserRecord};
use crate::api::AdminApi;
use crate::error::{DashboardError, Result};

const FETCH_USERS_FAILED: &str = "Failed to fetch users";
const FETCH_IMAGES_FAILED: &str = "Failed to load images";

/// Fetch the full user list
pub async fn fetch_directory(api: Arc<dyn AdminApi>, token: String) -> Result<Vec<UserRecord>> {
    api.list_users(&token).await
}

/// Fetch and decode every image stored for one user.
///
/// Decoding runs on the blocking pool; a single bad payload fails the batch.
pub async fn fetch_user_images(api: Arc<dyn AdminApi>, user_id: i64, token: String) -> Result<Vec<ImageSource>> {
    let payloads = api.user_images(user_id, &token).await?;

    tokio::task::spawn_blocking(move || {
        payloads
            .iter()
            .map(|payload| ImageSource::decode(&payload.image))
            .collect::<Result<Vec<_>>>()
    })
    .await
    .map_err(|e| DashboardError::network(format!("Image decode task failed: {}", e)))?
}

/// Where the user list is in its fetch cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectoryStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Images shown on top of the directory for one user
#[derive(Debug, Clone, Default)]
pub struct ImageOverlay {
    pub visible: bool,
    pub user_id: Option<i64>,
    pub images: Vec<ImageSource>,
}

impl ImageOverlay {
    fn open(&mut self, user_id: i64, images: Vec<ImageSource>) {
        self.visible = true;
        self.user_id = Some(user_id);
        self.images = images;
    }

    fn close(&mut self) {
        *self = Self::default();
    }
}

/// User list, overlay and the error banner for the logged-in view
#[derive(Debug, Clone, Default)]
pub struct Directory {
    users: Vec<UserRecord>,
    status: DirectoryStatus,
    error: Option<String>,
    overlay: ImageOverlay,
    pending_images: Option<i64>,
    last_updated: Option<DateTime<Local>>,
}

impl Directory {
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn status(&self) -> DirectoryStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn overlay(&self) -> &ImageOverlay {
        &self.overlay
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats::from_users(&self.users)
    }

    /// User whose images are being fetched, if any
    pub fn pending_images(&self) -> Option<i64> {
        self.pending_images
    }

    /// A fetch is about to start. The previous list stays visible and any
    /// image request in flight is abandoned. False if a fetch is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.status == DirectoryStatus::Loading {
            debug!("Directory fetch already in flight");
            return false;
        }
        self.status = DirectoryStatus::Loading;
        self.error = None;
        self.pending_images = None;
        true
    }

    /// Replace the list wholesale, or keep it and show an error
    pub fn apply_users(&mut self, result: Result<Vec<UserRecord>>) {
        match result {
            Ok(users) => {
                info!("Loaded {} users", users.len());
                self.users = users;
                self.status = DirectoryStatus::Loaded;
                self.error = None;
                self.last_updated = Some(Local::now());
            }
            Err(e) => {
                warn!("Directory fetch failed: {}", e);
                self.status = DirectoryStatus::Failed;
                self.error = Some(e.banner(FETCH_USERS_FAILED));
            }
        }
    }

    /// Image requests need a rendered directory, a closed overlay and no
    /// other image request in flight
    pub fn can_request_images(&self) -> bool {
        self.status == DirectoryStatus::Loaded && !self.overlay.visible && self.pending_images.is_none()
    }

    /// Mark an image request for `user_id` in flight. False if not allowed now.
    pub fn begin_images(&mut self, user_id: i64) -> bool {
        if !self.can_request_images() {
            debug!("Ignoring image request for user {}", user_id);
            return false;
        }
        self.pending_images = Some(user_id);
        self.error = None;
        true
    }

    /// Open the overlay with fresh images, or leave it closed and show an error
    pub fn apply_images(&mut self, user_id: i64, result: Result<Vec<ImageSource>>) {
        if self.pending_images != Some(user_id) || self.status != DirectoryStatus::Loaded {
            debug!("Dropping images for user {} that were not requested", user_id);
            return;
        }
        self.pending_images = None;

        match result {
            Ok(images) => {
                info!("Showing {} images for user {}", images.len(), user_id);
                self.overlay.open(user_id, images);
            }
            Err(e) => {
                warn!("Image fetch for user {} failed: {}", user_id, e);
                self.overlay.close();
                self.error = Some(e.banner(FETCH_IMAGES_FAILED));
            }
        }
    }

    pub fn dismiss_images(&mut self) {
        self.overlay.close();
    }

    /// Drop everything, as on logout
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
