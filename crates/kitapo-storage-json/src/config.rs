//! Store configuration persisted alongside the data directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kitapo_core::CoreError;

const CONFIG_FILE: &str = "config.json";

/// Where the JSON store keeps its workbooks, and which owner a single-user
/// deployment acts as by default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<Uuid>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_owner: None,
        }
    }
}

impl StoreConfig {
    /// Loads the config from `base_dir/config.json`, falling back to the
    /// defaults when no file exists yet.
    pub fn load_or_default(base_dir: &Path) -> Result<Self, CoreError> {
        let path = base_dir.join(CONFIG_FILE);
        if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, base_dir: &Path) -> Result<(), CoreError> {
        fs::create_dir_all(base_dir)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        fs::write(base_dir.join(CONFIG_FILE), json)?;
        Ok(())
    }
}

/// Platform data directory for the engine, with a local fallback when the
/// platform reports none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kitapo")
}
