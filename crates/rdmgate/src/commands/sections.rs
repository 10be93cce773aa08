//! Section catalog listing.

use tabled::Tabled;

use rdmgate_api::SimulatedBus;
use rdmgate_core::{Gateway, SectionDescriptor};

use crate::cli::DeviceArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Hint")]
    hint: String,
}

impl From<&SectionDescriptor> for SectionRow {
    fn from(s: &SectionDescriptor) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            hint: s.hint.clone(),
        }
    }
}

/// `id` alone, or `id<TAB>hint` when the section needs a hint.
fn plain(s: &SectionDescriptor) -> String {
    if s.hint.is_empty() {
        s.id.clone()
    } else {
        format!("{}\t{}", s.id, s.hint)
    }
}

pub fn handle(
    args: &DeviceArgs,
    gateway: &mut Gateway<SimulatedBus>,
    ctx: &Context,
) -> Result<(), CliError> {
    util::require_device(gateway, args.universe, args.uid)?;
    let sections = util::run_request(gateway, args.universe, |gw| {
        gw.list_sections(args.universe, args.uid)
    })?;

    let out = output::render_list(ctx.format, &sections, |s| SectionRow::from(s), plain)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
