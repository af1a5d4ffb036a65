//! Binary entry point: logging, CLI argument, event loop.

use std::path::PathBuf;

use anyhow::Result;
use pulse_quad::AppConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = AppConfig::default();
    if let Some(path) = std::env::args().nth(1) {
        config.shader_path = PathBuf::from(path);
    }

    log::info!(
        "starting pulse-quad (shader: {})",
        config.shader_path.display()
    );

    pulse_quad::run(config)
}
