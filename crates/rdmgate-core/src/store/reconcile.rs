// ── Reconciliation ──
//
// Mark-and-sweep against a fresh UID list (or universe list). Existing
// entries keep their labels; new ones start empty and queue resolution.

use std::collections::BTreeSet;

use rdmgate_api::Uid;

use super::registry::{LabelKind, PendingResolution, ResolvedUid, UidRegistry};

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub added: usize,
    pub evicted: usize,
    pub queued: usize,
}

impl UidRegistry {
    /// Reconcile `universe` against `current`, creating the state if needed.
    ///
    /// Every entry is marked inactive, entries present in `current` are
    /// re-activated (labels untouched), unseen UIDs are inserted with empty
    /// labels, and whatever is still inactive afterwards is evicted. When
    /// `enqueue` is set, each new UID queues a manufacturer-label task
    /// immediately followed by a device-label task.
    pub fn reconcile(
        &mut self,
        universe: u32,
        current: &BTreeSet<Uid>,
        enqueue: bool,
    ) -> ReconcileSummary {
        let state = self.get_or_create(universe);
        let mut summary = ReconcileSummary::default();

        for entry in state.uids.values_mut() {
            entry.active = false;
        }

        for uid in current {
            if let Some(entry) = state.uids.get_mut(uid) {
                entry.active = true;
                continue;
            }
            state.uids.insert(
                *uid,
                ResolvedUid {
                    active: true,
                    ..ResolvedUid::default()
                },
            );
            summary.added += 1;
            if enqueue {
                for kind in [LabelKind::Manufacturer, LabelKind::Device] {
                    state.pending.push_back(PendingResolution { uid: *uid, kind });
                    summary.queued += 1;
                }
            }
        }

        let before = state.uids.len();
        state.uids.retain(|_, entry| entry.active);
        summary.evicted = before - state.uids.len();
        summary
    }

    /// Destroy every tracked universe not in `active`. Returns the removed ids.
    pub fn prune_universes(&mut self, active: &BTreeSet<u32>) -> Vec<u32> {
        for (id, state) in self.iter_mut() {
            state.active = active.contains(id);
        }
        let stale: Vec<u32> = self
            .universes()
            .into_iter()
            .filter(|id| self.get(*id).is_some_and(|s| !s.active))
            .collect();
        for id in &stale {
            self.remove(*id);
        }
        stale
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const A: Uid = Uid::new(0x7a70, 1);
    const B: Uid = Uid::new(0x7a70, 2);
    const C: Uid = Uid::new(0x0001, 9);

    fn set(uids: &[Uid]) -> BTreeSet<Uid> {
        uids.iter().copied().collect()
    }

    #[test]
    fn reconcile_twice_is_idempotent() {
        let mut registry = UidRegistry::new();
        registry.reconcile(1, &set(&[A, B]), true);
        registry.get_mut(1).unwrap().uids.get_mut(&A).unwrap().device_label = "Dimmer".into();
        let before = registry.get(1).unwrap().clone();

        let summary = registry.reconcile(1, &set(&[A, B]), true);

        assert_eq!(summary, ReconcileSummary::default());
        assert_eq!(registry.get(1).unwrap(), &before);
    }

    #[test]
    fn missing_uids_are_evicted_and_survivors_untouched() {
        let mut registry = UidRegistry::new();
        registry.reconcile(1, &set(&[A, B]), true);
        registry.set_label(1, A, LabelKind::Manufacturer, "Open Lighting".into());

        let summary = registry.reconcile(1, &set(&[A]), true);

        assert_eq!(summary.evicted, 1);
        assert!(registry.entry(1, B).is_none());
        let a = registry.entry(1, A).unwrap();
        assert_eq!(a.manufacturer_label, "Open Lighting");
        assert!(a.active);
    }

    #[test]
    fn new_uids_queue_manufacturer_then_device_in_discovery_order() {
        let mut registry = UidRegistry::new();
        registry.reconcile(1, &set(&[B, A]), true);
        registry.reconcile(1, &set(&[A, B, C]), true);

        let queue: Vec<(Uid, LabelKind)> = registry
            .get(1)
            .unwrap()
            .pending
            .iter()
            .map(|t| (t.uid, t.kind))
            .collect();
        assert_eq!(
            queue,
            vec![
                (A, LabelKind::Manufacturer),
                (A, LabelKind::Device),
                (B, LabelKind::Manufacturer),
                (B, LabelKind::Device),
                (C, LabelKind::Manufacturer),
                (C, LabelKind::Device),
            ]
        );
    }

    #[test]
    fn reconcile_without_resolution_queues_nothing() {
        let mut registry = UidRegistry::new();
        let summary = registry.reconcile(1, &set(&[A]), false);
        assert_eq!(summary.added, 1);
        assert!(registry.get(1).unwrap().pending.is_empty());
    }

    #[test]
    fn prune_drops_untracked_universes() {
        let mut registry = UidRegistry::new();
        registry.reconcile(1, &set(&[A]), true);
        registry.reconcile(2, &set(&[B]), true);
        registry.reconcile(3, &set(&[]), true);

        let removed = registry.prune_universes(&[2].into_iter().collect());

        assert_eq!(removed, vec![1, 3]);
        assert_eq!(registry.universes(), vec![2]);
        assert!(registry.entry(2, B).is_some());
    }
}
