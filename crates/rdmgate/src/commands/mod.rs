//! Command handlers, one module per subcommand.

mod get;
mod pids;
mod sections;
mod set;
mod uids;
mod util;

use rdmgate_api::SimulatedBus;
use rdmgate_core::Gateway;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;

/// Resolved presentation settings shared by every handler.
#[derive(Debug)]
pub struct Context {
    pub format: OutputFormat,
    pub quiet: bool,
    pub color: bool,
}

/// Route a parsed command to its handler.
pub fn dispatch(
    cmd: Command,
    gateway: &mut Gateway<SimulatedBus>,
    ctx: &Context,
) -> Result<(), CliError> {
    match cmd {
        Command::Uids(args) => uids::handle(&args, gateway, ctx),
        Command::Sections(args) => sections::handle(&args, gateway, ctx),
        Command::Pids(args) => pids::handle(&args, gateway, ctx),
        Command::Get(args) => get::handle(&args, gateway, ctx),
        Command::Set(args) => set::handle(&args, gateway, ctx),
    }
}
