//! Shared application state and configuration.
//!
//! The embedding application (request layer) holds one `AppState` and hands
//! `&AppState` to every operation. Locks come from `parking_lot` so a panic
//! in one request can't poison state for the rest of the process.

use std::path::PathBuf;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::db::StaffDb;
use crate::error::ApiError;

/// On-disk configuration, `~/.staffdesk/config.json`. Every field has a
/// default so a missing file means a default install, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Where the database and audit trail live. Defaults to `~/.staffdesk`.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve the effective data directory.
    pub fn resolved_data_dir(&self) -> Result<PathBuf, ApiError> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        default_data_dir()
    }
}

fn default_data_dir() -> Result<PathBuf, ApiError> {
    dirs::home_dir()
        .map(|home| home.join(".staffdesk"))
        .ok_or_else(|| ApiError::Config("Could not find home directory".to_string()))
}

/// Get the canonical config file path (~/.staffdesk/config.json)
pub fn config_path() -> Result<PathBuf, ApiError> {
    Ok(default_data_dir()?.join("config.json"))
}

/// Load configuration from disk, falling back to defaults when absent.
pub fn load_config() -> Result<Config, ApiError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| ApiError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| ApiError::Config(format!("Invalid config file: {}", e)))
}

/// Application state shared across requests.
pub struct AppState {
    pub config: RwLock<Config>,
    pub db: Mutex<Option<StaffDb>>,
}

impl AppState {
    /// Load config and open the store. A store failure leaves `db` empty and
    /// is logged; read paths then answer with a configuration error instead
    /// of panicking.
    pub fn new() -> Self {
        let config = load_config().unwrap_or_else(|e| {
            log::warn!("Falling back to default config: {e}");
            Config::default()
        });

        let db = match config
            .resolved_data_dir()
            .and_then(|dir| StaffDb::open(&dir).map_err(ApiError::from))
        {
            Ok(db) => Some(db),
            Err(e) => {
                log::warn!("Failed to open staff database: {e}. Store features disabled.");
                None
            }
        };

        Self {
            config: RwLock::new(config),
            db: Mutex::new(db),
        }
    }

    /// Run a closure against the open store.
    pub fn with_db<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&StaffDb) -> Result<T, ApiError>,
    {
        let guard = self.db.lock();
        let db = guard
            .as_ref()
            .ok_or_else(|| ApiError::Config("Database not initialized".to_string()))?;
        f(db)
    }

    /// The data directory for audit writes, when configured.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.config.read().resolved_data_dir().ok()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
