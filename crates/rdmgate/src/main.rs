mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rdmgate_api::SimulatedBus;
use rdmgate_core::Gateway;

use crate::cli::Cli;
use crate::commands::Context;
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cfg = config::load(&cli.global)?;
    let format = config::output_format(&cli.global, &cfg)?;
    let bus = SimulatedBus::new(config::load_fixture(&cli.global, &cfg)?)?;

    let mut gateway = Gateway::new(bus, cfg.to_gateway_config());
    let ctx = Context {
        format,
        quiet: cli.global.quiet,
        color: output::should_color(&cli.global.color),
    };

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &mut gateway, &ctx)
}
