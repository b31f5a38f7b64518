//! Structured logging for the geometry routines
//!
//! The library only emits `tracing` events and spans; applications that want
//! to see them install a subscriber with [`init_logging`].

pub mod config;

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use config::LoggingConfig;

/// Keeps the background file writer alive; drop it to flush and stop.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Filter directive for this crate's targets at `level`
pub fn filter_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), level)
}

/// Install a global subscriber configured by `config`.
///
/// `RUST_LOG` takes precedence over `config.global_level` when set.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    config.validate().map_err(|e| anyhow!(e))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.global_level)));

    let mut layers = Vec::new();
    let mut file_guard = None;

    if config.console_output {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(config.include_file_location)
            .with_file(config.include_file_location);
        layers.push(console_layer.boxed());
    }

    if let Some(ref log_dir) = config.log_directory {
        let file_appender = tracing_appender::rolling::daily(log_dir, "geometry.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        file_guard = Some(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json();
        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    tracing::info!(?config, "logging initialized");
    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
