//! Supported parameter listing.

use serde::Serialize;
use tabled::Tabled;

use rdmgate_api::{Pid, SimulatedBus};
use rdmgate_core::Gateway;

use crate::cli::DeviceArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Serialize)]
struct SupportedPid {
    pid: u16,
    /// Protocol name when the gateway knows the parameter.
    name: Option<String>,
}

#[derive(Tabled)]
struct PidRow {
    #[tabled(rename = "PID")]
    pid: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&SupportedPid> for PidRow {
    fn from(p: &SupportedPid) -> Self {
        Self {
            pid: format!("0x{:04x}", p.pid),
            name: p.name.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

pub fn handle(
    args: &DeviceArgs,
    gateway: &mut Gateway<SimulatedBus>,
    ctx: &Context,
) -> Result<(), CliError> {
    util::require_device(gateway, args.universe, args.uid)?;
    let pids = util::run_request(gateway, args.universe, |gw| {
        gw.supported_pids(args.universe, args.uid)
    })?;

    let pids: Vec<SupportedPid> = pids
        .into_iter()
        .map(|pid| SupportedPid {
            pid,
            name: Pid::from_repr(pid).map(|p| p.to_string()),
        })
        .collect();

    let out = output::render_list(
        ctx.format,
        &pids,
        |p| PidRow::from(p),
        |p| format!("0x{:04x}", p.pid),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
