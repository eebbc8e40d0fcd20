use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Persists the session token between runs.
///
/// The file holds the bare token and nothing else:
/// - Linux: ~/.local/share/admin-dashboard/token
/// - macOS: ~/Library/Application Support/admin-dashboard/token
/// - Windows: %APPDATA%\admin-dashboard\token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default token location under the user's data directory
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("admin-dashboard");
        path.push("token");
        Some(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved token. A missing or blank file means "logged out".
    pub fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write the token, replacing any previous one
    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Remove the token. Clearing an absent token is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
