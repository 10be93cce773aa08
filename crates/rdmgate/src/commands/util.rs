//! Shared helpers for command handlers.

use rdmgate_api::{SimulatedBus, Uid};
use rdmgate_core::{CoreError, FromOutcome, Gateway, PendingReply};

use crate::error::CliError;

/// Fail early for a UID the bus does not know, instead of waiting on a
/// transaction that can only time out.
pub fn require_device(
    gateway: &Gateway<SimulatedBus>,
    universe: u32,
    uid: Uid,
) -> Result<(), CliError> {
    if gateway.transport().device(universe, uid).is_some() {
        return Ok(());
    }
    Err(CliError::UnknownDevice {
        universe,
        uid: uid.to_string(),
    })
}

/// Start a request, drain the bus, and take its result.
pub fn run_request<R: FromOutcome>(
    gateway: &mut Gateway<SimulatedBus>,
    universe: u32,
    start: impl FnOnce(&mut Gateway<SimulatedBus>) -> Result<PendingReply<R>, CoreError>,
) -> Result<R, CliError> {
    let mut reply = start(gateway).map_err(|e| CliError::from_core(e, universe))?;
    settle(gateway);
    match reply.try_take() {
        Some(result) => result.map_err(|e| CliError::from_core(e, universe)),
        None => Err(CliError::Incomplete {
            message: "the bus went idle before the device answered".into(),
        }),
    }
}

/// Feed every queued completion back into the gateway.
pub fn settle(gateway: &mut Gateway<SimulatedBus>) {
    let delivered = gateway.pump(SimulatedBus::poll_completion);
    tracing::debug!(delivered, "bus drained");
}
