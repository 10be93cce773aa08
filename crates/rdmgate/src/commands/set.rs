//! Section writes.

use serde::Serialize;

use rdmgate_api::{SimulatedBus, Uid};
use rdmgate_core::{FieldValues, Gateway};

use crate::cli::SetArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Serialize)]
struct SetResult<'a> {
    universe: u32,
    uid: Uid,
    section: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    hint: &'a str,
    fields: &'a FieldValues,
}

pub fn handle(
    args: &SetArgs,
    gateway: &mut Gateway<SimulatedBus>,
    ctx: &Context,
) -> Result<(), CliError> {
    let (universe, uid) = (args.device.universe, args.device.uid);
    util::require_device(gateway, universe, uid)?;

    // Later pairs win, matching form submission.
    let fields: FieldValues = args.fields.iter().cloned().collect();
    util::run_request(gateway, universe, |gw| {
        gw.set_section(universe, uid, &args.section, &args.hint, &fields)
    })?;
    tracing::info!(universe, %uid, section = %args.section, "section written");

    let result = SetResult {
        universe,
        uid,
        section: &args.section,
        hint: &args.hint,
        fields: &fields,
    };
    let message = format!("Updated {} on {uid}", args.section);
    let out = output::render_single(
        ctx.format,
        &result,
        |_| output::success(&message, ctx.color),
        |_| message.clone(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
