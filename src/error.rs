/// Error types shared by the session controller and the directory view model
///
/// Every error is recoverable: the UI shows a banner and the user retries.

use thiserror::Error;

/// Result alias used across the dashboard
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Everything that can go wrong between pressing a button and rendering the result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Credential fields were empty; no request was sent
    #[error("Email and password are required")]
    Validation,

    /// The server accepted the credentials but the account is not privileged
    #[error("Unauthorized role")]
    Authorization { role: String },

    /// Connection failure, non-2xx status or a response we could not parse
    #[error("{message}")]
    Network {
        message: String,
        status: Option<u16>,
    },
}

impl DashboardError {
    /// Build a network error that has no HTTP status attached
    pub fn network(message: impl Into<String>) -> Self {
        DashboardError::Network {
            message: message.into(),
            status: None,
        }
    }

    /// Build a network error for a non-success HTTP status
    pub fn status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("Server returned {}", status)
        } else {
            format!("Server returned {}: {}", status, body.trim())
        };
        DashboardError::Network {
            message,
            status: Some(status),
        }
    }

    /// Text for the error banner.
    ///
    /// Validation and authorization problems speak for themselves; network
    /// failures are summarised by the action that failed (`context`).
    pub fn banner(&self, context: &str) -> String {
        match self {
            DashboardError::Network { .. } => context.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Network {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_uses_context_for_network_errors() {
        let err = DashboardError::network("connection refused");
        assert_eq!(err.banner("Login failed"), "Login failed");
    }

    #[test]
    fn test_banner_keeps_validation_and_authorization_text() {
        assert_eq!(
            DashboardError::Validation.banner("Login failed"),
            "Email and password are required"
        );
        let err = DashboardError::Authorization { role: "USER".into() };
        assert_eq!(err.banner("Login failed"), "Unauthorized role");
    }

    #[test]
    fn test_status_error_carries_code_and_body() {
        let err = DashboardError::status(403, " Forbidden: Admin access only ");
        assert_eq!(
            err,
            DashboardError::Network {
                message: "Server returned 403: Forbidden: Admin access only".into(),
                status: Some(403),
            }
        );
        assert_eq!(DashboardError::status(500, "").to_string(), "Server returned 500");
    }
}
