use std::collections::{BTreeMap, VecDeque};

use rdmgate_api::{RdmCommand, Uid};

use crate::model::UidListing;

/// Which label a background resolution task fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Manufacturer,
    Device,
}

impl LabelKind {
    pub fn command(self) -> RdmCommand {
        match self {
            Self::Manufacturer => RdmCommand::GetManufacturerLabel,
            Self::Device => RdmCommand::GetDeviceLabel,
        }
    }
}

/// Resolved label state for one UID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedUid {
    pub manufacturer_label: String,
    pub device_label: String,
    /// Mark-and-sweep flag used during reconciliation.
    pub active: bool,
}

impl ResolvedUid {
    pub(crate) fn set_label(&mut self, kind: LabelKind, label: String) {
        match kind {
            LabelKind::Manufacturer => self.manufacturer_label = label,
            LabelKind::Device => self.device_label = label,
        }
    }
}

/// A queued background label fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingResolution {
    pub uid: Uid,
    pub kind: LabelKind,
}

/// Everything the gateway knows about one universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseState {
    pub uids: BTreeMap<Uid, ResolvedUid>,
    pub pending: VecDeque<PendingResolution>,
    /// True while the scheduler may have a background transaction in flight.
    pub running: bool,
    /// Mark-and-sweep flag used during universe pruning.
    pub active: bool,
    /// Distinguishes this state from an earlier one with the same universe
    /// id that was pruned and recreated.
    pub epoch: u64,
}

impl UniverseState {
    fn new(epoch: u64) -> Self {
        Self {
            uids: BTreeMap::new(),
            pending: VecDeque::new(),
            running: false,
            active: true,
            epoch,
        }
    }

    /// Snapshot of the UID list in UID order.
    pub fn listing(&self) -> Vec<UidListing> {
        self.uids
            .iter()
            .map(|(uid, entry)| UidListing {
                manufacturer_id: uid.manufacturer_id(),
                device_id: uid.device_id(),
                uid: *uid,
                device_label: entry.device_label.clone(),
                manufacturer_label: entry.manufacturer_label.clone(),
            })
            .collect()
    }
}

/// Owns every tracked [`UniverseState`]. States are created lazily and
/// destroyed only by pruning (or when the registry is dropped).
#[derive(Debug, Default)]
pub struct UidRegistry {
    universes: BTreeMap<u32, UniverseState>,
    next_epoch: u64,
}

impl UidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, universe: u32) -> Option<&UniverseState> {
        self.universes.get(&universe)
    }

    pub(crate) fn get_mut(&mut self, universe: u32) -> Option<&mut UniverseState> {
        self.universes.get_mut(&universe)
    }

    pub(crate) fn get_or_create(&mut self, universe: u32) -> &mut UniverseState {
        let next_epoch = &mut self.next_epoch;
        self.universes.entry(universe).or_insert_with(|| {
            *next_epoch += 1;
            UniverseState::new(*next_epoch)
        })
    }

    /// Tracked universe ids in ascending order.
    pub fn universes(&self) -> Vec<u32> {
        self.universes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }

    pub fn entry(&self, universe: u32, uid: Uid) -> Option<&ResolvedUid> {
        self.get(universe).and_then(|state| state.uids.get(&uid))
    }

    /// Store a freshly read label if the universe and UID are still tracked.
    /// Returns `true` if an entry was updated.
    pub(crate) fn set_label(
        &mut self,
        universe: u32,
        uid: Uid,
        kind: LabelKind,
        label: String,
    ) -> bool {
        match self.get_mut(universe).and_then(|s| s.uids.get_mut(&uid)) {
            Some(entry) => {
                entry.set_label(kind, label);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, universe: u32) -> Option<UniverseState> {
        self.universes.remove(&universe)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&u32, &mut UniverseState)> {
        self.universes.iter_mut()
    }
}
