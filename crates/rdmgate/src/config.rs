//! CLI configuration, a thin wrapper around `rdmgate_config` shared types.
//!
//! Adds CLI-specific resolution that respects `GlobalOpts` flag overrides
//! (--config, --fixture, --output).

use std::path::PathBuf;

use clap::ValueEnum;

use rdmgate_api::Fixture;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use rdmgate_config::{Config, config_path};

/// Load the config named by `--config`, or the canonical one.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let config = match global.config.as_deref() {
        Some(path) => rdmgate_config::load_config_from(path)?,
        None => rdmgate_config::load_config()?,
    };
    Ok(config)
}

/// Resolve the output format: flag > env > `defaults.output`.
pub fn output_format(global: &GlobalOpts, config: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    rdmgate_config::validate_output(&config.defaults.output)?;
    OutputFormat::from_str(&config.defaults.output, true)
        .map_err(|reason| CliError::Validation { message: reason })
}

/// Resolve the fixture path: flag > env > `defaults.fixture`.
pub fn fixture_path(global: &GlobalOpts, config: &Config) -> Result<PathBuf, CliError> {
    global
        .fixture
        .clone()
        .or_else(|| config.defaults.fixture.clone())
        .ok_or_else(|| CliError::NoFixture {
            path: global
                .config
                .clone()
                .unwrap_or_else(config_path)
                .display()
                .to_string(),
        })
}

/// Load the fixture the bus will serve.
pub fn load_fixture(global: &GlobalOpts, config: &Config) -> Result<Fixture, CliError> {
    let path = fixture_path(global, config)?;
    tracing::debug!(path = %path.display(), "loading fixture");
    Ok(rdmgate_config::load_fixture(&path)?)
}
