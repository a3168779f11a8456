use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::domain::{LogisticsParams, SmartMatchMode};

/// Session settings. Every field falls back to its default when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub smart_match: SmartMatchMode,
    /// Listings shown on the farmer dashboard.
    pub farmer_listing_ids: Vec<String>,
    pub logistics: LogisticsParams,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            smart_match: SmartMatchMode::default(),
            farmer_listing_ids: vec!["1".into(), "2".into(), "3".into()],
            logistics: LogisticsParams::default(),
            currency: "NPR".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(raw)?)
    }
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let data = fs::read_to_string(path)?;
    Settings::from_json_str(&data)
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
