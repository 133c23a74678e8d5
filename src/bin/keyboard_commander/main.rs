//! Demo game: a title screen and a gameplay screen driven by the keyboard.

mod gameplay;
mod splash;

use std::path::Path;

use keyboard_commander::prelude::*;
use log::{error, info};

/// Optional configuration next to the working directory.
const CONFIG_FILE: &str = "keyboard_commander.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("MAIN: Booting Keyboard Commander...");

    if let Err(err) = run() {
        error!("MAIN: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EngineError> {
    let config = if Path::new(CONFIG_FILE).exists() {
        info!("MAIN: Loading {}", CONFIG_FILE);
        EngineConfig::load(CONFIG_FILE)?
    } else {
        EngineConfig::default()
    };

    EngineBuilder::from_config(config)
        .build()?
        .run(Box::new(splash::Splash::new()))
}
