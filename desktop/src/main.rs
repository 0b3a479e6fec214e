use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use omni_core::application::{Application, Exit};

use crate::{
    assets::AssetCache,
    audio::CueAudio,
    cli::LaunchArgs,
    config::{CONFIG_FILE, LauncherConfig},
    display::MinifbDisplay,
    gamepad::Gamepad,
    launch::HeroicLauncher,
    setup::{Locations, RfdPrompter},
};

mod assets;
mod audio;
mod cli;
mod config;
mod display;
mod framebuffer;
mod gamepad;
mod launch;
mod setup;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = LaunchArgs::parse(env::args().skip(1));
    let config_path = Path::new(CONFIG_FILE);
    let mut config = config::load_config(config_path).unwrap_or_else(|err| {
        log::error!("Unable to read {}: {}", config_path.display(), err);
        LauncherConfig::default()
    });

    if cli::try_direct_launch(&args, &config, &mut HeroicLauncher::new(config.clone())) {
        return ExitCode::SUCCESS;
    }

    let save = |config: &LauncherConfig| {
        if let Err(err) = config::save_config(config_path, config) {
            log::error!("Unable to save {}: {}", config_path.display(), err);
        }
    };
    if let Err(err) = setup::ensure_configured(&mut config, &mut RfdPrompter, &Locations::from_env(), save) {
        log::error!("Setup aborted: {}", err);
        return ExitCode::from(1);
    }

    log::info!("Omni launcher started");
    run(&args, config)
}

fn run(args: &LaunchArgs, config: LauncherConfig) -> ExitCode {
    let mut display = match MinifbDisplay::open(args.fullscreen) {
        Ok(display) => display,
        Err(err) => {
            log::error!("Unable to open window: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let asset_dir = assets::asset_dir();
    let mut assets = AssetCache::new(&asset_dir);
    let mut audio = CueAudio::new(&asset_dir);
    let mut gamepad = Gamepad::new();
    let mut launcher = HeroicLauncher::new(config.clone());
    let mut application = Application::new(config.availability());

    let start = Instant::now();
    let mut events = Vec::new();
    loop {
        events.clear();
        display.poll_events(&mut events);
        gamepad.poll(&mut events);

        let now_ms = start.elapsed().as_millis() as u64;
        match application.update(display.size(), &events, now_ms, &mut audio, &mut launcher) {
            Some(Exit::Quit) => return ExitCode::SUCCESS,
            Some(Exit::Launched(item)) => {
                log::info!("Game {} started, closing launcher", item);
                return ExitCode::SUCCESS;
            }
            None => {}
        }

        if application.take_fullscreen_toggle() {
            if let Err(err) = display.toggle_fullscreen() {
                log::error!("Unable to switch fullscreen: {}", err);
            }
        }

        let elapsed_secs = start.elapsed().as_secs_f32();
        application.draw(&mut display.canvas(&mut assets), elapsed_secs);
        if let Err(err) = display.present() {
            // Closing the window surfaces as a close request next frame.
            log::debug!("Unable to present frame: {}", err);
        }
    }
}
