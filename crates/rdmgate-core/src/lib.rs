// rdmgate-core: UID registry, label resolution and section pipeline for the RDM gateway

pub mod classify;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod pipeline;
pub mod reply;
mod dispatch;
mod scheduler;
pub mod store;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{ClassifiedStatus, classify, classify_completion};
pub use config::GatewayConfig;
pub use error::CoreError;
pub use gateway::Gateway;
pub use model::{
    AttributeItem, FieldValues, ItemValue, SectionData, SectionDescriptor, SectionKind,
    UidListing,
};
pub use pipeline::catalog::build_catalog;
pub use reply::{FromOutcome, Outcome, PendingReply};
pub use store::{
    LabelKind, PendingResolution, ReconcileSummary, ResolvedUid, UidRegistry, UniverseState,
};
