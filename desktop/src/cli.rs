use log::{error, info};
use omni_core::{
    availability::InstallState,
    catalog,
    host::GameLauncher,
};

use crate::config::LauncherConfig;

/// Command line options. Anything unrecognised is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    pub fullscreen: bool,
    /// Menu item named by the one direct-launch flag given, if exactly one
    /// was.
    pub direct_launch: Option<usize>,
}

impl LaunchArgs {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = LaunchArgs::default();
        let mut items = Vec::new();
        for arg in args {
            match arg.as_ref() {
                "-f" => parsed.fullscreen = true,
                flag => items.extend(catalog::item_for_flag(flag)),
            }
        }
        if items.len() == 1 {
            parsed.direct_launch = items.first().copied();
        } else if items.len() > 1 {
            info!("Several games named on the command line, showing the menu");
        }
        parsed
    }
}

/// Launches the game named on the command line. Returns `true` when it
/// started; otherwise the menu should be shown as usual.
pub fn try_direct_launch(
    args: &LaunchArgs,
    config: &LauncherConfig,
    launcher: &mut impl GameLauncher,
) -> bool {
    let Some(item) = args.direct_launch else {
        return false;
    };
    let Some(game) = catalog::game(item) else {
        return false;
    };
    match config.install_state(game.collection) {
        Some(InstallState::Installed(_)) => {}
        _ => {
            error!("{} is not installed", game.collection.key());
            return false;
        }
    }
    if launcher.launch(item) {
        true
    } else {
        error!("Failed to launch game for argument: {}", game.flag);
        false
    }
}
