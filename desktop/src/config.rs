use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use omni_core::{
    availability::{Availability, InstallState},
    catalog::Collection,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const CONFIG_FILE: &str = "LauncherConfig.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted launcher settings. Collections hold an install folder or
/// `Not Installed`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    #[serde(rename = "KH1.5+2.5", default, skip_serializing_if = "Option::is_none")]
    pub remix: Option<String>,
    #[serde(rename = "KH2.8", default, skip_serializing_if = "Option::is_none")]
    pub final_chapter: Option<String>,
    #[serde(rename = "KH3", default, skip_serializing_if = "Option::is_none")]
    pub kh3: Option<String>,
    #[serde(rename = "HeroicGamesConfig", default, skip_serializing_if = "Option::is_none")]
    pub games_config: Option<PathBuf>,
    #[serde(rename = "HeroicPath", default, skip_serializing_if = "Option::is_none")]
    pub heroic_path: Option<PathBuf>,
    /// Keys the launcher does not use, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LauncherConfig {
    fn slot(&self, collection: Collection) -> &Option<String> {
        match collection {
            Collection::Remix => &self.remix,
            Collection::FinalChapter => &self.final_chapter,
            Collection::Kh3 => &self.kh3,
        }
    }

    fn slot_mut(&mut self, collection: Collection) -> &mut Option<String> {
        match collection {
            Collection::Remix => &mut self.remix,
            Collection::FinalChapter => &mut self.final_chapter,
            Collection::Kh3 => &mut self.kh3,
        }
    }

    pub fn install_state(&self, collection: Collection) -> Option<InstallState> {
        self.slot(collection)
            .as_deref()
            .map(InstallState::from_config_value)
    }

    pub fn set_install_state(&mut self, collection: Collection, state: InstallState) {
        *self.slot_mut(collection) = Some(state.as_config_value().to_string());
    }

    /// Install folder of a collection that is installed.
    pub fn install_path(&self, collection: Collection) -> Option<PathBuf> {
        match self.install_state(collection)? {
            InstallState::Installed(path) => Some(PathBuf::from(path)),
            InstallState::NotInstalled => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Forgets every launcher setting, keeping unrelated keys.
    pub fn reset(&mut self) {
        let extra = std::mem::take(&mut self.extra);
        *self = Self {
            extra,
            ..Self::default()
        };
    }

    /// Nothing usable was recorded: no collection has an install folder.
    pub fn needs_full_setup(&self) -> bool {
        Collection::ALL
            .into_iter()
            .all(|collection| self.install_path(collection).is_none())
    }

    pub fn availability(&self) -> Availability {
        let mut availability = Availability::new();
        for collection in Collection::ALL {
            if let Some(state) = self.install_state(collection) {
                availability.set(collection, state);
            }
        }
        availability
    }
}

/// Reads the configuration. A missing file is an empty configuration; an
/// unreadable one is moved aside to `<file>.bak` and also treated as empty.
pub fn load_config(path: &Path) -> Result<LauncherConfig, ConfigError> {
    if !path.exists() {
        debug!("No configuration at {}", path.display());
        return Ok(LauncherConfig::default());
    }
    let data = fs::read_to_string(path)?;
    match serde_json::from_str::<LauncherConfig>(&data) {
        Ok(config) => Ok(config),
        Err(err) => {
            let mut backup = path.as_os_str().to_owned();
            backup.push(".bak");
            let backup = PathBuf::from(backup);
            warn!(
                "{} is corrupted or empty ({}), moving it to {} and starting fresh",
                path.display(),
                err,
                backup.display()
            );
            fs::rename(path, &backup)?;
            Ok(LauncherConfig::default())
        }
    }
}

/// Writes the configuration as JSON indented by four spaces.
pub fn save_config(path: &Path, config: &LauncherConfig) -> Result<(), ConfigError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    config.serialize(&mut serializer)?;
    fs::write(path, out)?;
    debug!("Configuration saved to {}", path.display());
    Ok(())
}
