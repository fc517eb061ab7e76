//! Command implementations

pub mod status;
pub mod tail;
pub mod write;

use anyhow::Result;
use slog_core::SlogConfig;

use crate::cli::Cli;

/// Load the config file and apply command-line overrides
pub fn resolve_config(cli: &Cli) -> Result<SlogConfig> {
    let mut config = match &cli.config {
        Some(path) => SlogConfig::load_required(path)?,
        None => SlogConfig::load()?,
    };

    if let Some(file) = &cli.file {
        config.path = file.clone();
    }
    if let Some(size_mb) = cli.size_mb {
        config.rotation_size_mb = size_mb;
    }
    if let Some(max_lines) = cli.max_lines {
        config.rotation_max_lines = max_lines;
    }

    config.validate()?;
    Ok(config)
}
