use std::fs;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::thread;
use std::time::Duration;

use log::{debug, error, info};
use omni_core::{
    catalog::{self, Collection},
    host::GameLauncher,
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::LauncherConfig;

/// How long Heroic must survive for a launch to count as started.
pub const LAUNCH_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no game at menu index {0}")]
    UnknownItem(usize),
    #[error("{} is not installed", .0.title())]
    NotInstalled(Collection),
    #[error("the Heroic GamesConfig folder is not configured")]
    NoGamesConfig,
    #[error("the Heroic executable is not configured")]
    NoHeroic,
    #[error("game executable not found: {}", .0.display())]
    MissingExecutable(PathBuf),
    #[error("{} does not hold a JSON object", .0.display())]
    NotAnObject(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Heroic exited early ({0})")]
    ExitedEarly(ExitStatus),
}

/// Points Heroic's per-game config for `item` at the right executable.
/// Returns the config file that was written.
pub fn update_game_config(config: &LauncherConfig, item: usize) -> Result<PathBuf, LaunchError> {
    let game = catalog::game(item).ok_or(LaunchError::UnknownItem(item))?;
    let collection = game.collection;
    let install = config
        .install_path(collection)
        .ok_or(LaunchError::NotInstalled(collection))?;
    let games_config = config.games_config.as_ref().ok_or(LaunchError::NoGamesConfig)?;

    let target_exe = install.join(game.exe);
    if !target_exe.exists() {
        return Err(LaunchError::MissingExecutable(target_exe));
    }

    let id = collection.config_id();
    let json_path = games_config.join(format!("{id}.json"));
    let content = match fs::read_to_string(&json_path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };
    let mut document = if content.trim().is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            _ => return Err(LaunchError::NotAnObject(json_path)),
        }
    };

    let entry = document
        .entry(id)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(entry) = entry else {
        return Err(LaunchError::NotAnObject(json_path));
    };
    entry.insert(
        "targetExe".into(),
        Value::String(target_exe.to_string_lossy().replace('\\', "/")),
    );
    document
        .entry("version")
        .or_insert_with(|| Value::String("v0".into()));
    document.entry("explicit").or_insert(Value::Bool(true));

    fs::write(&json_path, serde_json::to_string_pretty(&Value::Object(document))?)?;
    debug!("Updated {}", json_path.display());
    Ok(json_path)
}

/// Updates the game config, then asks Heroic to start the game and waits
/// `grace` to see that it stays up.
pub fn launch_game(config: &LauncherConfig, item: usize, grace: Duration) -> Result<(), LaunchError> {
    update_game_config(config, item)?;
    let heroic = config.heroic_path.as_ref().ok_or(LaunchError::NoHeroic)?;
    let id = catalog::game(item)
        .ok_or(LaunchError::UnknownItem(item))?
        .collection
        .config_id();

    info!("Launching {} through {}", id, heroic.display());
    let mut child = Command::new(heroic)
        .args(["--no-gui", "--no-sandbox"])
        .arg(format!("heroic://launch/{id}"))
        .spawn()?;
    thread::sleep(grace);
    match child.try_wait()? {
        None => Ok(()),
        Some(status) => Err(LaunchError::ExitedEarly(status)),
    }
}

/// Launches games through Heroic.
pub struct HeroicLauncher {
    config: LauncherConfig,
    grace: Duration,
}

impl HeroicLauncher {
    pub fn new(config: LauncherConfig) -> Self {
        Self {
            config,
            grace: LAUNCH_GRACE,
        }
    }
}

impl GameLauncher for HeroicLauncher {
    fn launch(&mut self, item: usize) -> bool {
        match launch_game(&self.config, item, self.grace) {
            Ok(()) => true,
            Err(err) => {
                error!("Unable to launch item {}: {}", item, err);
                false
            }
        }
    }
}
