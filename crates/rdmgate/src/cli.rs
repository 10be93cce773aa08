//! Clap derive structures for the `rdmgate` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use rdmgate_api::Uid;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rdmgate -- inspect and configure RDM devices
#[derive(Debug, Parser)]
#[command(
    name = "rdmgate",
    version,
    about = "Inspect and configure RDM devices from the command line",
    long_about = "Discover RDM responders, list the configuration sections they support,\n\
        and read or write those sections.\n\n\
        Transactions run against a simulated bus described by a TOML fixture.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "RDMGATE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Simulated bus fixture (overrides defaults.fixture)
    #[arg(long, short = 'f', env = "RDMGATE_FIXTURE", global = true)]
    pub fixture: Option<PathBuf>,

    /// Output format (overrides defaults.output)
    #[arg(long, short = 'o', env = "RDMGATE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List responders and their labels
    #[command(alias = "ls")]
    Uids(UidsArgs),

    /// List the configuration sections a device supports
    Sections(DeviceArgs),

    /// List the parameter ids a device reports as supported
    Pids(DeviceArgs),

    /// Read one section
    Get(GetArgs),

    /// Write one section
    Set(SetArgs),
}

// ── Arguments ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UidsArgs {
    /// Only this universe (default: every universe on the bus)
    #[arg(long, short = 'u')]
    pub universe: Option<u32>,
}

#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Universe id
    pub universe: u32,

    /// Device UID (mmmm:dddddddd)
    pub uid: Uid,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Section id, as listed by `rdmgate sections`
    pub section: String,

    /// Section hint, as listed by `rdmgate sections`
    #[arg(long, default_value = "")]
    pub hint: String,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// Section id, as listed by `rdmgate sections`
    pub section: String,

    /// Section hint, as listed by `rdmgate sections`
    #[arg(long, default_value = "")]
    pub hint: String,

    /// Field values to write (field=value)
    #[arg(value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((name.to_owned(), value.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_collects_field_pairs() {
        let cli = Cli::try_parse_from([
            "rdmgate",
            "set",
            "1",
            "7a70:00000001",
            "dmx_address",
            "address=100",
            "label=",
        ])
        .unwrap();
        let Command::Set(args) = cli.command else {
            panic!("expected set");
        };
        assert_eq!(args.device.uid, Uid::new(0x7a70, 1));
        assert_eq!(
            args.fields,
            vec![
                ("address".to_owned(), "100".to_owned()),
                ("label".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn field_without_equals_is_rejected() {
        assert!(parse_field("address").is_err());
        assert!(parse_field("=5").is_err());
    }

    #[test]
    fn malformed_uid_is_a_usage_error() {
        let err = Cli::try_parse_from(["rdmgate", "pids", "1", "nope"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
