//! UID listing.

use serde::Serialize;
use tabled::Tabled;

use rdmgate_api::SimulatedBus;
use rdmgate_core::{Gateway, UidListing};

use crate::cli::UidsArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct UniverseUid {
    universe: u32,
    #[serde(flatten)]
    listing: UidListing,
}

#[derive(Tabled)]
struct UidRow {
    #[tabled(rename = "Universe")]
    universe: u32,
    #[tabled(rename = "UID")]
    uid: String,
    #[tabled(rename = "Manufacturer")]
    manufacturer: String,
    #[tabled(rename = "Device")]
    device: String,
}

impl From<&UniverseUid> for UidRow {
    fn from(u: &UniverseUid) -> Self {
        Self {
            universe: u.universe,
            uid: u.listing.uid.to_string(),
            manufacturer: u.listing.manufacturer_label.clone(),
            device: u.listing.device_label.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    args: &UidsArgs,
    gateway: &mut Gateway<SimulatedBus>,
    ctx: &Context,
) -> Result<(), CliError> {
    let present = gateway.transport().universes();
    let pruned = gateway.prune_universes(present.iter().copied());
    tracing::debug!(?pruned, "pruned universes");

    let universes = match args.universe {
        Some(universe) => vec![universe],
        None => present,
    };

    // First pass seeds the registry and queues label reads.
    for &universe in &universes {
        let uids = gateway.transport().uids(universe);
        let listing = gateway.reconcile_uid_list(universe, uids);
        tracing::info!(universe, devices = listing.len(), "discovered");
    }
    util::settle(gateway);
    for &universe in &universes {
        if gateway.is_resolving(universe) {
            tracing::warn!(
                universe,
                pending = gateway.pending_tasks(universe),
                "label resolution still running"
            );
        }
    }

    let rows: Vec<UniverseUid> = universes
        .iter()
        .flat_map(|&universe| {
            gateway
                .uid_listing(universe)
                .into_iter()
                .map(move |listing| UniverseUid { universe, listing })
        })
        .collect();

    let out = output::render_list(
        ctx.format,
        &rows,
        |u| UidRow::from(u),
        |u| u.listing.uid.to_string(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
