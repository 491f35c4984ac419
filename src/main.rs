//=========================================================================
// celestial — portfolio runner
//
// Usage:
//   celestial [CONFIG.toml]
//
// Loads the optional TOML config (defaults otherwise), opens the window
// and logs each presented frame. RUST_LOG controls verbosity.
//
//=========================================================================

use std::process::ExitCode;

use celestial_portfolio::{LogSurface, PortfolioBuilder, PortfolioConfig};
use log::{error, warn};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => match PortfolioConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                PortfolioConfig::default()
            }
        },
        None => PortfolioConfig::default(),
    };

    let result = PortfolioBuilder::new()
        .with_config(config)
        .build()
        .run(LogSurface::new());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
