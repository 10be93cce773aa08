// ── Domain model ──
//
// Types the gateway hands back to its frontend. All of them serialize so
// a frontend can render them however it likes.

pub mod section;

pub use section::{
    AttributeItem, FieldValues, ItemValue, SectionData, SectionDescriptor, SectionKind,
};

use serde::Serialize;

use rdmgate_api::Uid;

/// One row of the rendered UID list. Labels stay empty until resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UidListing {
    pub manufacturer_id: u16,
    pub device_id: u32,
    pub uid: Uid,
    pub device_label: String,
    pub manufacturer_label: String,
}
