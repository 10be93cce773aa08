// ── Label resolution scheduler ──
//
// Single-flight drain loop per universe. At most one background
// transaction per universe is outstanding; the next task is only submitted
// from the previous task's completion. A task the transport rejects is
// dropped (the next reconciliation of a fresh UID re-queues it).

use tracing::debug;

use rdmgate_api::{RdmCommand, RdmPayload, RdmTransport, Token};

use crate::classify::ClassifiedStatus;
use crate::dispatch::Dispatcher;
use crate::store::{PendingResolution, UidRegistry};

/// An accepted background label fetch awaiting its completion.
#[derive(Debug, Clone)]
pub(crate) struct Resolution {
    pub universe: u32,
    /// Epoch of the `UniverseState` that issued the task.
    pub epoch: u64,
    pub task: PendingResolution,
    pub command: RdmCommand,
}

/// Pop and submit tasks until one is accepted or the queue runs dry.
pub(crate) fn resolve_next<T: RdmTransport>(
    registry: &mut UidRegistry,
    dispatcher: &mut Dispatcher<T>,
    universe: u32,
) -> Option<(Token, Resolution)> {
    let state = registry.get_mut(universe)?;

    loop {
        let Some(task) = state.pending.pop_front() else {
            state.running = false;
            debug!(universe, "label resolution idle");
            return None;
        };
        state.running = true;

        let command = task.kind.command();
        if let Some(token) = dispatcher.submit(universe, task.uid, command.clone()) {
            return Some((
                token,
                Resolution {
                    universe,
                    epoch: state.epoch,
                    task,
                    command,
                },
            ));
        }
        debug!(universe, uid = %task.uid, kind = ?task.kind, "dropping rejected label resolution");
    }
}

/// Apply a finished label fetch and resume the universe's drain loop.
///
/// A completion for a universe that was pruned (or pruned and recreated
/// since submission) changes nothing and does not resume anything.
pub(crate) fn on_label_resolved<T: RdmTransport>(
    registry: &mut UidRegistry,
    dispatcher: &mut Dispatcher<T>,
    resolution: Resolution,
    status: &ClassifiedStatus,
    payload: RdmPayload,
) -> Option<(Token, Resolution)> {
    let Resolution {
        universe,
        epoch,
        task,
        ..
    } = resolution;

    let state = match registry.get_mut(universe) {
        Some(state) if state.epoch == epoch => state,
        _ => {
            debug!(universe, uid = %task.uid, "label resolved for a pruned universe");
            return None;
        }
    };

    match (status.is_success(), payload) {
        (true, RdmPayload::Label(label)) => {
            if let Some(entry) = state.uids.get_mut(&task.uid) {
                debug!(universe, uid = %task.uid, kind = ?task.kind, %label, "label resolved");
                entry.set_label(task.kind, label);
            }
        }
        _ => {
            debug!(
                universe,
                uid = %task.uid,
                kind = ?task.kind,
                error = %status.message(),
                "label resolution failed"
            );
        }
    }

    resolve_next(registry, dispatcher, universe)
}
