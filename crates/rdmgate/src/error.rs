//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use rdmgate_core::{ClassifiedStatus, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Bus ──────────────────────────────────────────────────────────

    #[error("Failed to send request, client isn't connected")]
    #[diagnostic(
        code(rdmgate::disconnected),
        help("The device may still be busy with an earlier transaction. Try again.")
    )]
    Disconnected,

    #[error("Transaction failed: {message}")]
    #[diagnostic(
        code(rdmgate::transport),
        help("Check that the device is powered and answering on universe {universe}.")
    )]
    Transport { universe: u32, message: String },

    // ── Device ───────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(rdmgate::device))]
    Device { message: String },

    #[error("No device {uid} on universe {universe}")]
    #[diagnostic(code(rdmgate::not_found), help("Run: rdmgate uids --universe {universe}"))]
    UnknownDevice { universe: u32, uid: String },

    #[error("Unknown section: {section}")]
    #[diagnostic(
        code(rdmgate::unknown_section),
        help("Run: rdmgate sections <universe> <uid> to see what the device supports")
    )]
    UnknownSection { section: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(rdmgate::validation))]
    Validation { message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No simulated bus fixture configured")]
    #[diagnostic(
        code(rdmgate::no_fixture),
        help(
            "Pass --fixture <path>, set RDMGATE_FIXTURE,\n\
             or set defaults.fixture in {path}"
        )
    )]
    NoFixture { path: String },

    #[error(transparent)]
    #[diagnostic(code(rdmgate::config))]
    Config(#[from] rdmgate_config::ConfigError),

    #[error(transparent)]
    #[diagnostic(code(rdmgate::fixture))]
    Api(#[from] rdmgate_api::Error),

    // ── Internal ─────────────────────────────────────────────────────

    #[error("Request did not complete: {message}")]
    #[diagnostic(code(rdmgate::internal))]
    Incomplete { message: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(rdmgate::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(rdmgate::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Disconnected | Self::Transport { .. } => exit_code::CONNECTION,
            Self::UnknownDevice { .. } | Self::UnknownSection { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the universe to transport failures coming out of the core.
    pub fn from_core(err: CoreError, universe: u32) -> Self {
        match err {
            CoreError::Protocol {
                status: ClassifiedStatus::TransportError(_),
                message,
            } => Self::Transport { universe, message },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation { message },

            CoreError::UnknownSection { section } => CliError::UnknownSection { section },

            CoreError::BackendDisconnected => CliError::Disconnected,

            CoreError::Protocol { message, .. } => CliError::Device { message },

            CoreError::Api(err) => CliError::Api(err),

            CoreError::ReplyDropped => CliError::Incomplete {
                message: "the gateway went away".into(),
            },

            CoreError::Internal(message) => CliError::Incomplete { message },
        }
    }
}
