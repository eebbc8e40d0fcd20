/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer.

use base64::Engine;
use iced::widget::image::Handle;
use serde::{Deserialize, Deserializer};

use crate::display::{self, MeritTier, Severity};
use crate::error::{DashboardError, Result};

/// Every image payload is shown through this data-URI scheme
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Role the server assigns when none is set
const DEFAULT_ROLE: &str = "USER";

/// One row of the user directory, as returned by `GET /users`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    /// Unique server-assigned ID
    pub id: i64,
    pub email: String,
    #[serde(default = "default_role", deserialize_with = "role_or_default")]
    pub role: String,
    /// The service spells this `foulConunt`
    #[serde(rename = "foulConunt", alias = "violationCount", default)]
    pub violation_count: u32,
    /// The service spells this `marit`
    #[serde(rename = "marit", alias = "meritScore", default)]
    pub merit_score: i64,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

/// Accept `"role": null` as the default role
fn role_or_default<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let role = Option::<String>::deserialize(deserializer)?;
    Ok(role.unwrap_or_else(default_role))
}

impl UserRecord {
    pub fn merit_tier(&self) -> MeritTier {
        MeritTier::from_score(self.merit_score)
    }

    pub fn severity(&self) -> Severity {
        Severity::from_count(self.violation_count)
    }

    pub fn is_privileged(&self) -> bool {
        display::is_privileged(&self.role)
    }
}

/// Counts shown on the stat cards above the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total: usize,
    pub admins: usize,
    pub gold: usize,
    pub clean: usize,
}

impl DirectoryStats {
    pub fn from_users(users: &[UserRecord]) -> Self {
        users.iter().fold(
            DirectoryStats {
                total: users.len(),
                ..Default::default()
            },
            |mut stats, user| {
                if user.is_privileged() {
                    stats.admins += 1;
                }
                if user.merit_tier() == MeritTier::Gold {
                    stats.gold += 1;
                }
                if user.severity() == Severity::None {
                    stats.clean += 1;
                }
                stats
            },
        )
    }
}

/// A decoded per-user image, ready for the overlay
#[derive(Debug, Clone)]
pub struct ImageSource {
    /// `DATA_URI_PREFIX` followed by the base64 payload
    pub data_uri: String,
    /// Size of the decoded image in bytes
    pub byte_len: usize,
    /// Detected container format
    pub format: image::ImageFormat,
    /// Renderable handle over the decoded bytes
    pub handle: Handle,
}

impl ImageSource {
    /// Decode one base64 payload from `GET /user/{id}`.
    ///
    /// The payload may already carry a `data:...;base64,` prefix; it is
    /// replaced by the fixed prefix. Anything that is not base64 or not a
    /// known image format is a parse failure.
    pub fn decode(payload: &str) -> Result<Self> {
        let body = match payload.trim().strip_prefix("data:") {
            Some(rest) => rest
                .split_once(',')
                .map(|(_, body)| body)
                .ok_or_else(|| DashboardError::network("Malformed data URI in image payload"))?,
            None => payload.trim(),
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(body)
            .map_err(|e| DashboardError::network(format!("Invalid base64 image payload: {}", e)))?;

        let format = image::guess_format(&bytes)
            .map_err(|e| DashboardError::network(format!("Unrecognised image payload: {}", e)))?;

        Ok(ImageSource {
            data_uri: format!("{}{}", DATA_URI_PREFIX, body),
            byte_len: bytes.len(),
            format,
            handle: Handle::from_bytes(bytes),
        })
    }
}
