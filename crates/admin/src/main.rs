#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::Cli;
use config::AdminConfig;
use cvo_storage::{SqliteStore, StoreError, UpgradeError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug)]
pub(crate) enum AdminError {
    Config(String),
    Usage(&'static str),
    Store(StoreError),
    Upgrade(UpgradeError),
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "config: {message}"),
            Self::Usage(message) => write!(f, "usage: {message}"),
            Self::Store(err) => write!(f, "storage: {err}"),
            Self::Upgrade(err) => write!(f, "upgrade: {err}"),
        }
    }
}

impl std::error::Error for AdminError {}

impl From<StoreError> for AdminError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<UpgradeError> for AdminError {
    fn from(value: UpgradeError) -> Self {
        Self::Upgrade(value)
    }
}

fn main() -> ExitCode {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "cvo-admin failed");
            eprintln!("cvo-admin: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins when set and valid; otherwise everything at info and above.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn run(cli: Cli) -> Result<Vec<String>, AdminError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => AdminConfig::load(path)?,
        None => AdminConfig::default(),
    };
    if let Some(storage_dir) = cli.storage_dir {
        config.storage_dir = storage_dir;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    let upgrade_config = config.upgrade_config()?;
    tracing::debug!(
        storage_dir = %config.storage_dir.display(),
        format = %upgrade_config.format,
        "opening store"
    );
    let mut store = SqliteStore::open(&config.storage_dir)?;
    commands::execute(&mut store, &upgrade_config, &cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn rust_log_level_is_kept() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn missing_or_blank_rust_log_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
