use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Access token issued for one FatSecret profile.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    pub auth_token: String,
    pub auth_secret: String,
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserToken")
            .field("auth_token", &self.auth_token)
            .field("auth_secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenFile {
    #[serde(default)]
    users: BTreeMap<String, UserToken>,
}

/// Local cache of user tokens, stored as TOML at the config's `datastore` path.
///
/// A missing file is an empty store; it is created on the first [`TokenStore::save`].
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    file: TokenFile,
}

impl TokenStore {
    /// Loads the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file exists but cannot be read, and `ConfigError`
    /// if its contents are not a valid token file.
    pub fn open(path: &Path) -> AppResult<Self> {
        let file = if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to read token store {}: {e}",
                    path.display()
                ))
            })?;
            toml::from_str(&contents).map_err(|e| {
                AppError::ConfigError(format!(
                    "Failed to parse token store {}: {e}",
                    path.display()
                ))
            })?
        } else {
            debug!(path = %path.display(), "Token store not found, starting empty");
            TokenFile::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, user: &str) -> Option<&UserToken> {
        self.file.users.get(user)
    }

    pub fn insert(&mut self, user: &str, token: UserToken) {
        self.file.users.insert(user.to_string(), token);
    }

    /// Writes the store to disk through a temporary `.part` file and a rename.
    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&self.file)
            .map_err(|e| AppError::IoError(format!("Failed to serialize token store: {e}")))?;

        let tmp_path = self.path.with_extension("part");
        fs::write(&tmp_path, contents).map_err(|e| {
            AppError::IoError(format!(
                "Failed to write temp file {}: {e}",
                tmp_path.display()
            ))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            AppError::IoError(format!(
                "Failed to rename temp file {} to {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })?;
        Ok(())
    }
}
