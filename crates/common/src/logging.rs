//! Logging and tracing initialization.
//!
//! `RUST_LOG` always wins over the configured level so a single run can be
//! turned up to `trace` (which prints one kinematics readout per tick)
//! without editing the config file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::BallbotResult;

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Fails only when the configured log file cannot be opened. A subscriber
/// that is already installed (e.g. by another test) is left in place.
pub fn init_logging(config: &LoggingConfig) -> BallbotResult<()> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .with_thread_ids(false);

    match (&config.file, config.json) {
        (Some(path), json) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if json {
                tracing::subscriber::set_global_default(builder.json().finish()).ok();
            } else {
                tracing::subscriber::set_global_default(builder.finish()).ok();
            }
        }
        (None, true) => {
            tracing::subscriber::set_global_default(builder.json().finish()).ok();
        }
        (None, false) => {
            let subscriber = builder.with_file(false).with_line_number(false).finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }

    tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

/// Initialize stderr logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    // No file is configured by default, so this cannot fail.
    let _ = init_logging(&LoggingConfig::default());
}
