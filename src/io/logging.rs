use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

/// Environment variable that overrides the configured filter
pub const LOG_ENV: &str = "LANES_LOG";

/// Build the filter: `LANES_LOG` when set and valid, else the configured level.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the configured log file.
///
/// Returns false (and installs nothing) when no file is configured: the TUI
/// owns the terminal, so there is nowhere else to write.
pub fn init(config: &LogConfig) -> Result<bool, std::io::Error> {
    let Some(path) = &config.file else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok();
    Ok(installed)
}
