//! Shared configuration for the RDM gateway tools.
//!
//! TOML config (platform config dir, merged with `RDMGATE_*` environment
//! variables), translation to `rdmgate_core::GatewayConfig`, and loading of
//! simulated-bus fixtures. The CLI adds flag-aware wrappers on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rdmgate_api::Fixture;
use rdmgate_core::GatewayConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to parse fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub gateway: GatewaySection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Simulated bus fixture used when `--fixture` is not given.
    pub fixture: Option<PathBuf>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            fixture: None,
        }
    }
}

fn default_output() -> String {
    "table".into()
}

/// `[gateway]` table: how transactions are addressed and whether labels
/// are resolved in the background.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GatewaySection {
    #[serde(default)]
    pub sub_device: u16,

    #[serde(default = "default_resolve_labels")]
    pub resolve_labels: bool,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            sub_device: 0,
            resolve_labels: default_resolve_labels(),
        }
    }
}

fn default_resolve_labels() -> bool {
    true
}

impl Config {
    /// Build the runtime gateway config.
    pub fn to_gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            sub_device: self.gateway.sub_device,
            resolve_labels: self.gateway.resolve_labels,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rdmgate", "rdmgate").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rdmgate");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file is not an
/// error; defaults apply.
///
/// Environment keys use `__` between table and field, e.g.
/// `RDMGATE_GATEWAY__SUB_DEVICE=1`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("RDMGATE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Fixtures ────────────────────────────────────────────────────────

/// Read a simulated-bus fixture from a TOML file.
pub fn load_fixture(path: &Path) -> Result<Fixture, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Fixture {
        path: path.to_owned(),
        source,
    })
}

/// Parse the `--output` / `defaults.output` value.
pub fn validate_output(output: &str) -> Result<(), ConfigError> {
    match output {
        "table" | "json" | "json-compact" | "yaml" | "plain" => Ok(()),
        other => Err(ConfigError::Validation {
            field: "defaults.output".into(),
            reason: format!("expected table, json, json-compact, yaml, or plain, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.to_gateway_config(), GatewayConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_temp(
            r#"
[defaults]
output = "json"
fixture = "/tmp/bus.toml"

[gateway]
sub_device = 2
resolve_labels = false
"#,
        );
        let config = load_config_from(file.path()).unwrap();

        assert_eq!(config.defaults.output, "json");
        assert_eq!(config.defaults.fixture, Some(PathBuf::from("/tmp/bus.toml")));
        assert_eq!(
            config.to_gateway_config(),
            GatewayConfig {
                sub_device: 2,
                resolve_labels: false,
            }
        );
    }

    #[test]
    fn partial_gateway_table_keeps_other_defaults() {
        let file = write_temp("[gateway]\nsub_device = 5\n");
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.gateway.sub_device, 5);
        assert!(config.gateway.resolve_labels);
    }

    #[test]
    fn fixture_loads_from_toml() {
        let file = write_temp(
            r#"
[[universes]]
id = 4

[[universes.devices]]
uid = "7a70:0000000a"
device_label = "Par"
"#,
        );
        let fixture = load_fixture(file.path()).unwrap();
        assert_eq!(fixture.universes.len(), 1);
        assert_eq!(fixture.universes[0].devices[0].device_label, "Par");
    }

    #[test]
    fn bad_fixture_names_the_file() {
        let file = write_temp("[[universes]]\nid = \"four\"\n");
        let err = load_fixture(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Fixture { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn unknown_output_is_rejected() {
        assert!(validate_output("yaml").is_ok());
        assert!(validate_output("xml").is_err());
    }
}
