// ── UID registry ──
//
// Per-universe UID state owned by the gateway. Mutated only by
// reconciliation, pruning, and the label-resolution scheduler.

mod reconcile;
mod registry;

pub use reconcile::ReconcileSummary;
pub use registry::{LabelKind, PendingResolution, ResolvedUid, UidRegistry, UniverseState};
