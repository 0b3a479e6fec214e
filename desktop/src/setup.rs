//! First-run and repair prompts for the install folders and Heroic paths.

use std::path::{Path, PathBuf};

use log::{debug, info};
use omni_core::{availability::InstallState, catalog::Collection};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use thiserror::Error;

use crate::config::LauncherConfig;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("the Heroic GamesConfig folder is required")]
    GamesConfigRequired,
    #[error("the Heroic executable is required")]
    HeroicRequired,
}

/// The user-facing side of setup.
pub trait Prompter {
    fn pick_folder(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf>;
    fn pick_executable(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf>;
    /// Yes/no question; `true` for yes.
    fn ask(&mut self, title: &str, message: &str) -> bool;
    fn error(&mut self, title: &str, message: &str);
}

/// Native dialogs.
pub struct RfdPrompter;

impl Prompter for RfdPrompter {
    fn pick_folder(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title(title);
        if let Some(start) = start {
            dialog = dialog.set_directory(start);
        }
        dialog.pick_folder()
    }

    fn pick_executable(&mut self, title: &str, start: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title(title);
        if cfg!(windows) {
            dialog = dialog.add_filter("Executable files", &["exe"]);
        }
        if let Some(start) = start {
            dialog = dialog.set_directory(start);
        }
        dialog.pick_file()
    }

    fn ask(&mut self, title: &str, message: &str) -> bool {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }

    fn error(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Where Heroic keeps its files by default.
#[derive(Clone, Debug, Default)]
pub struct Locations {
    pub games_config: Option<PathBuf>,
    pub heroic_dir: Option<PathBuf>,
}

impl Locations {
    /// `%APPDATA%/heroic/GamesConfig` and `%LOCALAPPDATA%/Programs/heroic`.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var_os(name).filter(|value| !value.is_empty());
        Self {
            games_config: var("APPDATA").map(|dir| PathBuf::from(dir).join("heroic").join("GamesConfig")),
            heroic_dir: var("LOCALAPPDATA").map(|dir| PathBuf::from(dir).join("Programs").join("heroic")),
        }
    }
}

/// Every required file exists below `folder`.
pub fn validate_install_path(folder: &Path, required_files: &[&str]) -> bool {
    required_files.iter().all(|file| folder.join(file).exists())
}

/// At least one of the collections has a Heroic config in `folder`.
pub fn validate_games_config(folder: &Path) -> bool {
    Collection::ALL
        .into_iter()
        .any(|collection| folder.join(format!("{}.json", collection.config_id())).exists())
}

pub fn is_heroic_executable(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case("heroic"))
}

fn existing(path: Option<&PathBuf>) -> Option<&Path> {
    path.map(PathBuf::as_path).filter(|path| path.exists())
}

fn needs_prompt(config: &LauncherConfig, collection: Collection) -> bool {
    match config.install_state(collection) {
        None => true,
        Some(InstallState::NotInstalled) => false,
        Some(InstallState::Installed(path)) => !Path::new(&path).exists(),
    }
}

fn prompt_collection(prompter: &mut impl Prompter, collection: Collection) -> InstallState {
    let title = collection.title();
    loop {
        debug!("Prompting for the {} folder", title);
        let picked = prompter.pick_folder(
            &format!("Select the installation folder for {title} or cancel to proceed without it."),
            None,
        );
        let Some(folder) = picked else {
            if prompter.ask(
                "Missing Path",
                &format!("You did not select a folder for {title}. Do you want to continue without this game?"),
            ) {
                return InstallState::NotInstalled;
            }
            continue;
        };
        if validate_install_path(&folder, collection.required_files()) {
            return InstallState::Installed(folder.to_string_lossy().into_owned());
        }
        prompter.error(
            "Invalid Path",
            &format!("The selected folder is not a valid installation path for {title}. Please try again."),
        );
    }
}

fn prompt_games_config(
    prompter: &mut impl Prompter,
    locations: &Locations,
) -> Result<PathBuf, SetupError> {
    loop {
        let picked = prompter.pick_folder(
            "Select the Heroic GamesConfig folder (usually AppData/Roaming/heroic/GamesConfig)",
            existing(locations.games_config.as_ref()),
        );
        let Some(folder) = picked else {
            prompter.error(
                "Missing Path",
                "You must select the Heroic GamesConfig folder to proceed. The launcher will now exit.",
            );
            return Err(SetupError::GamesConfigRequired);
        };
        if validate_games_config(&folder) {
            return Ok(folder);
        }
        prompter.error(
            "Invalid Path",
            "The selected folder is not a valid GamesConfig path or no games are installed via Heroic. Please try again.",
        );
    }
}

fn prompt_heroic(prompter: &mut impl Prompter, locations: &Locations) -> Result<PathBuf, SetupError> {
    loop {
        let picked = prompter.pick_executable("Select Heroic.exe", existing(locations.heroic_dir.as_ref()));
        let Some(path) = picked else {
            prompter.error(
                "Missing Heroic",
                "You must select the Heroic executable to proceed. The launcher will now exit.",
            );
            return Err(SetupError::HeroicRequired);
        };
        if is_heroic_executable(&path) {
            return Ok(path);
        }
        prompter.error("Invalid File", "Please select the Heroic.exe executable.");
    }
}

/// Fills in whatever the configuration lacks. When no collection has a
/// usable folder the whole configuration is asked for again. `save` runs
/// after every accepted answer, so a fatal cancel keeps the earlier ones.
pub fn ensure_configured(
    config: &mut LauncherConfig,
    prompter: &mut impl Prompter,
    locations: &Locations,
    mut save: impl FnMut(&LauncherConfig),
) -> Result<(), SetupError> {
    if config.is_empty() {
        info!("No configuration found, running first-time setup");
    } else if config.needs_full_setup() {
        info!("No game folders configured, asking for all of them again");
        config.reset();
    }

    for collection in Collection::ALL {
        if needs_prompt(config, collection) {
            let state = prompt_collection(prompter, collection);
            config.set_install_state(collection, state);
            save(config);
        }
    }

    if config.games_config.is_none() {
        config.games_config = Some(prompt_games_config(prompter, locations)?);
        save(config);
    }

    if config.heroic_path.as_ref().is_none_or(|path| !path.exists()) {
        debug!("Heroic executable missing, prompting");
        config.heroic_path = Some(prompt_heroic(prompter, locations)?);
        save(config);
    }
    Ok(())
}
