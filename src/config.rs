use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_DELAY_MS, FATSECRET_API_URL};
use crate::errors::{AppError, AppResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// API credentials of the registered FatSecret application.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsumerConfig {
    pub key: String,
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: SecretString,
}

/// FatSecret profile to export and where its access token is cached.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    pub name: String,
    pub datastore: PathBuf,
}

/// Optional export tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Pause after every remote call, in milliseconds. `0` disables the pause.
    pub delay_ms: u64,
    /// REST endpoint; only overridden to point at a test server.
    pub api_url: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            api_url: FATSECRET_API_URL.to_string(),
        }
    }
}

/// Contents of the `~/.fatsecret` config file.
///
/// The `consumer` and `user` sections are required; `export` falls back to defaults.
/// Unknown keys are rejected so typos are not silently ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub consumer: ConsumerConfig,
    pub user: UserConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Loads and validates the config file.
    ///
    /// The `datastore` path may start with `~/`, which is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, is not valid TOML, lacks
    /// required keys, has empty credentials, or names an invalid `api_url`.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates config contents.
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let mut config: Config = toml::from_str(contents)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config: {e}")))?;

        if config.consumer.key.trim().is_empty() {
            return Err(AppError::ConfigError("consumer.key must not be empty".into()));
        }
        if config.consumer.secret.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError("consumer.secret must not be empty".into()));
        }
        if config.user.name.trim().is_empty() {
            return Err(AppError::ConfigError("user.name must not be empty".into()));
        }
        if config.user.datastore.as_os_str().is_empty() {
            return Err(AppError::ConfigError("user.datastore must not be empty".into()));
        }
        Url::parse(&config.export.api_url)?;

        config.user.datastore = expand_home(&config.user.datastore);
        Ok(config)
    }
}

/// Default config location: `~/.fatsecret`.
pub fn default_config_path() -> AppResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CONFIG_FILE))
        .ok_or_else(|| {
            AppError::ConfigError("Cannot locate home directory; pass --config".into())
        })
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(SecretString::new(raw.into()))
}
