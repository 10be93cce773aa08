// ── Gateway facade ──
//
// Owns the registry, the transport, and every in-flight continuation.
// Frontend calls return as soon as the first transaction is submitted;
// the owner's reactor loop feeds completions back through `complete`.

use std::collections::{BTreeSet, HashMap};

use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use rdmgate_api::{Completion, RdmCommand, RdmPayload, RdmTransport, Token, Uid};

use crate::classify::classify_completion;
use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::error::CoreError;
use crate::model::{FieldValues, SectionData, SectionDescriptor, SectionKind, UidListing};
use crate::pipeline::{self, SectionOp, Step};
use crate::reply::{FromOutcome, PendingReply, ReplySender};
use crate::scheduler::{self, Resolution};
use crate::store::UidRegistry;

/// A frontend operation waiting on its next completion.
#[derive(Debug)]
struct SectionRequest {
    universe: u32,
    uid: Uid,
    command: RdmCommand,
    op: SectionOp,
    reply: ReplySender,
}

#[derive(Debug)]
enum InFlight {
    Resolution(Resolution),
    Section(SectionRequest),
}

/// The device-attribute gateway.
///
/// Single-threaded and `&mut`-driven: nothing here blocks or spawns. A
/// typical owner loop submits frontend calls, then repeatedly polls its
/// transport for completions and hands each one to [`complete`](Self::complete)
/// (or uses [`pump`](Self::pump) to do both).
pub struct Gateway<T: RdmTransport> {
    config: GatewayConfig,
    registry: UidRegistry,
    dispatcher: Dispatcher<T>,
    in_flight: HashMap<Token, InFlight>,
    sections: HashMap<&'static str, SectionKind>,
}

impl<T: RdmTransport> Gateway<T> {
    pub fn new(transport: T, config: GatewayConfig) -> Self {
        let sections = SectionKind::iter().map(|kind| (kind.id(), kind)).collect();
        Self {
            dispatcher: Dispatcher::new(transport, config.sub_device),
            config,
            registry: UidRegistry::new(),
            in_flight: HashMap::new(),
            sections,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn registry(&self) -> &UidRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.dispatcher.transport_mut()
    }

    /// Number of accepted transactions still awaiting completion.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether the label scheduler believes work is in flight for `universe`.
    pub fn is_resolving(&self, universe: u32) -> bool {
        self.registry.get(universe).is_some_and(|s| s.running)
    }

    /// Label-resolution tasks still queued for `universe`.
    pub fn pending_tasks(&self, universe: u32) -> usize {
        self.registry.get(universe).map_or(0, |s| s.pending.len())
    }

    // ── UID list ─────────────────────────────────────────────────────

    /// Reconcile `universe` against a fresh UID list, start label
    /// resolution if it is idle, and return the rendered list.
    pub fn reconcile_uid_list(
        &mut self,
        universe: u32,
        uids: impl IntoIterator<Item = Uid>,
    ) -> Vec<UidListing> {
        let current: BTreeSet<Uid> = uids.into_iter().collect();
        let summary = self
            .registry
            .reconcile(universe, &current, self.config.resolve_labels);
        debug!(
            universe,
            added = summary.added,
            evicted = summary.evicted,
            queued = summary.queued,
            "reconciled uid list"
        );

        if !self.is_resolving(universe) {
            self.resolve_next(universe);
        }
        self.uid_listing(universe)
    }

    /// Current UID list for `universe` without reconciling.
    pub fn uid_listing(&self, universe: u32) -> Vec<UidListing> {
        self.registry
            .get(universe)
            .map(crate::store::UniverseState::listing)
            .unwrap_or_default()
    }

    /// Destroy state for every universe not in `active`. Completions still
    /// in flight for a destroyed universe become no-ops.
    pub fn prune_universes(&mut self, active: impl IntoIterator<Item = u32>) -> Vec<u32> {
        let active: BTreeSet<u32> = active.into_iter().collect();
        let removed = self.registry.prune_universes(&active);
        if !removed.is_empty() {
            info!(?removed, "pruned universes");
        }
        removed
    }

    // ── Sections ─────────────────────────────────────────────────────

    /// Resolve a section id through the static table.
    pub fn section_kind(&self, section_id: &str) -> Result<SectionKind, CoreError> {
        self.sections
            .get(section_id)
            .copied()
            .ok_or_else(|| CoreError::UnknownSection {
                section: section_id.to_owned(),
            })
    }

    /// Start building the section catalog for a device.
    pub fn list_sections(
        &mut self,
        universe: u32,
        uid: Uid,
    ) -> Result<PendingReply<Vec<SectionDescriptor>>, CoreError> {
        let (command, op) = pipeline::begin_catalog();
        self.start(universe, uid, command, op)
    }

    /// Fetch the raw SUPPORTED_PARAMETERS list for a device.
    pub fn supported_pids(
        &mut self,
        universe: u32,
        uid: Uid,
    ) -> Result<PendingReply<Vec<u16>>, CoreError> {
        let (command, op) = pipeline::begin_supported_pids();
        self.start(universe, uid, command, op)
    }

    /// Start reading a section.
    pub fn get_section(
        &mut self,
        universe: u32,
        uid: Uid,
        section_id: &str,
        hint: &str,
    ) -> Result<PendingReply<SectionData>, CoreError> {
        let kind = self.section_kind(section_id)?;
        let (command, op) = pipeline::begin_get(kind, hint)?;
        self.start(universe, uid, command, op)
    }

    /// Validate `fields` and start writing a section. Invalid input fails
    /// here without submitting anything.
    pub fn set_section(
        &mut self,
        universe: u32,
        uid: Uid,
        section_id: &str,
        hint: &str,
        fields: &FieldValues,
    ) -> Result<PendingReply<()>, CoreError> {
        let kind = self.section_kind(section_id)?;
        let (command, op) = pipeline::begin_set(kind, hint, fields)?;
        self.start(universe, uid, command, op)
    }

    fn start<R: FromOutcome>(
        &mut self,
        universe: u32,
        uid: Uid,
        command: RdmCommand,
        op: SectionOp,
    ) -> Result<PendingReply<R>, CoreError> {
        let token = self
            .dispatcher
            .submit(universe, uid, command.clone())
            .ok_or(CoreError::BackendDisconnected)?;
        let (reply, pending) = PendingReply::channel();
        self.in_flight.insert(
            token,
            InFlight::Section(SectionRequest {
                universe,
                uid,
                command,
                op,
                reply,
            }),
        );
        Ok(pending)
    }

    // ── Completions ──────────────────────────────────────────────────

    /// Deliver one completion. Returns `false` for a token the gateway
    /// never issued (or already consumed).
    pub fn complete(&mut self, completion: Completion) -> bool {
        let Some(entry) = self.in_flight.remove(&completion.token) else {
            warn!(token = %completion.token, "completion for unknown token");
            return false;
        };

        match entry {
            InFlight::Resolution(resolution) => {
                let status = classify_completion(
                    &resolution.command,
                    &completion.status,
                    &completion.payload,
                );
                let next = scheduler::on_label_resolved(
                    &mut self.registry,
                    &mut self.dispatcher,
                    resolution,
                    &status,
                    completion.payload,
                );
                if let Some((token, resolution)) = next {
                    self.in_flight.insert(token, InFlight::Resolution(resolution));
                }
            }
            InFlight::Section(request) => self.advance_section(request, completion),
        }
        true
    }

    /// Feed completions from `poll` until it returns `None`. Returns how
    /// many were delivered.
    pub fn pump(&mut self, mut poll: impl FnMut(&mut T) -> Option<Completion>) -> usize {
        let mut delivered = 0;
        while let Some(completion) = poll(self.dispatcher.transport_mut()) {
            self.complete(completion);
            delivered += 1;
        }
        delivered
    }

    fn advance_section(&mut self, request: SectionRequest, completion: Completion) {
        let SectionRequest {
            universe,
            uid,
            command,
            op,
            reply,
        } = request;

        let status = classify_completion(&command, &completion.status, &completion.payload);
        if let (Some(kind), true, RdmPayload::Label(label)) =
            (op.learned_label(), status.is_success(), &completion.payload)
        {
            self.registry.set_label(universe, uid, kind, label.clone());
        }

        let result = match op.advance(status, completion.payload) {
            Step::Pending { command, op } => {
                match self.dispatcher.submit(universe, uid, command.clone()) {
                    Some(token) => {
                        self.in_flight.insert(
                            token,
                            InFlight::Section(SectionRequest {
                                universe,
                                uid,
                                command,
                                op,
                                reply,
                            }),
                        );
                        return;
                    }
                    None => Err(CoreError::BackendDisconnected),
                }
            }
            Step::Done(outcome) => Ok(outcome),
            Step::Failed(err) => {
                debug!(universe, %uid, pid = %command.pid(), error = %err, "section operation failed");
                Err(err)
            }
        };
        // The frontend may have dropped its reply handle.
        let _ = reply.send(result);
    }

    fn resolve_next(&mut self, universe: u32) {
        if let Some((token, resolution)) =
            scheduler::resolve_next(&mut self.registry, &mut self.dispatcher, universe)
        {
            self.in_flight.insert(token, InFlight::Resolution(resolution));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rdmgate_api::{ResponseStatus, Transaction};

    use super::*;
    use crate::testing::MockTransport;

    const A: Uid = Uid::new(0x7a70, 1);
    const B: Uid = Uid::new(0x7a70, 2);
    const C: Uid = Uid::new(0x7a70, 3);

    fn gateway() -> Gateway<MockTransport> {
        Gateway::new(MockTransport::default(), GatewayConfig::default())
    }

    fn label(token: Token, text: &str) -> Completion {
        Completion::new(token, ResponseStatus::valid(), RdmPayload::Label(text.into()))
    }

    fn last(gw: &Gateway<MockTransport>) -> (Token, Transaction) {
        gw.transport().last().clone()
    }

    // ── Label resolution ────────────────────────────────────────────

    #[test]
    fn resolution_is_single_flight_per_universe() {
        let mut gw = gateway();
        let listing = gw.reconcile_uid_list(1, [A, B]);

        assert_eq!(listing.len(), 2);
        assert!(listing.iter().all(|l| l.device_label.is_empty()));
        assert_eq!(gw.transport().submitted.len(), 1);
        assert_eq!(gw.pending_tasks(1), 3);
        assert!(gw.is_resolving(1));

        // New work while running must not start a second transaction.
        gw.reconcile_uid_list(1, [A, B, C]);
        assert_eq!(gw.transport().submitted.len(), 1);
        assert_eq!(gw.pending_tasks(1), 5);

        let (token, txn) = last(&gw);
        assert_eq!((txn.uid, txn.command), (A, RdmCommand::GetManufacturerLabel));
        assert!(gw.complete(label(token, "Open Lighting")));

        assert_eq!(gw.transport().submitted.len(), 2);
        let (_, txn) = last(&gw);
        assert_eq!((txn.uid, txn.command), (A, RdmCommand::GetDeviceLabel));
        assert_eq!(
            gw.registry().entry(1, A).unwrap().manufacturer_label,
            "Open Lighting"
        );
    }

    #[test]
    fn drained_queue_goes_idle_and_restarts_on_reconcile() {
        let mut gw = gateway();
        gw.reconcile_uid_list(1, [A]);
        for text in ["Open Lighting", "Dimmer"] {
            let (token, _) = last(&gw);
            gw.complete(label(token, text));
        }
        assert!(!gw.is_resolving(1));
        assert_eq!(gw.in_flight(), 0);

        let listing = gw.uid_listing(1);
        assert_eq!(listing[0].manufacturer_label, "Open Lighting");
        assert_eq!(listing[0].device_label, "Dimmer");

        gw.reconcile_uid_list(1, [A, B]);
        assert!(gw.is_resolving(1));
        let (_, txn) = last(&gw);
        assert_eq!(txn.uid, B);
    }

    #[test]
    fn failed_resolution_leaves_labels_and_moves_on() {
        let mut gw = gateway();
        gw.reconcile_uid_list(1, [A]);
        let (token, _) = last(&gw);
        gw.complete(Completion::new(
            token,
            ResponseStatus::nacked(0),
            RdmPayload::Empty,
        ));

        assert_eq!(gw.registry().entry(1, A).unwrap().manufacturer_label, "");
        assert_eq!(gw.transport().submitted.len(), 2);
    }

    #[test]
    fn rejected_background_tasks_are_dropped() {
        let mut gw = gateway();
        gw.transport_mut().busy.insert(A);
        gw.reconcile_uid_list(1, [A, B]);

        // A's two tasks were tried and dropped; B's first task is in flight.
        assert_eq!(gw.transport().attempts, 3);
        let (_, txn) = last(&gw);
        assert_eq!((txn.uid, txn.command), (B, RdmCommand::GetManufacturerLabel));
        assert_eq!(gw.pending_tasks(1), 1);
    }

    #[test]
    fn all_rejected_leaves_scheduler_idle() {
        let mut gw = gateway();
        gw.transport_mut().disconnected = true;
        gw.reconcile_uid_list(1, [A, B]);

        assert!(!gw.is_resolving(1));
        assert_eq!(gw.pending_tasks(1), 0);
        assert_eq!(gw.in_flight(), 0);
    }

    #[test]
    fn completion_after_prune_is_a_no_op() {
        let mut gw = gateway();
        gw.reconcile_uid_list(1, [A]);
        let (token, _) = last(&gw);

        assert_eq!(gw.prune_universes([]), vec![1]);
        assert!(gw.complete(label(token, "Open Lighting")));

        assert!(gw.registry().is_empty());
        assert_eq!(gw.transport().submitted.len(), 1);
    }

    #[test]
    fn stale_completion_does_not_touch_recreated_universe() {
        let mut gw = gateway();
        gw.reconcile_uid_list(1, [A]);
        let (stale, _) = last(&gw);
        gw.prune_universes([]);

        gw.reconcile_uid_list(1, [A]);
        let submitted = gw.transport().submitted.len();
        assert_eq!(submitted, 2);

        gw.complete(label(stale, "Old"));
        assert_eq!(gw.registry().entry(1, A).unwrap().manufacturer_label, "");
        assert_eq!(gw.transport().submitted.len(), submitted);
        assert!(gw.is_resolving(1));
    }

    #[test]
    fn labels_are_not_resolved_when_disabled() {
        let config = GatewayConfig {
            resolve_labels: false,
            ..GatewayConfig::default()
        };
        let mut gw = Gateway::new(MockTransport::default(), config);
        gw.reconcile_uid_list(1, [A]);
        assert_eq!(gw.transport().attempts, 0);
    }

    #[test]
    fn unknown_token_is_reported() {
        let mut gw = gateway();
        assert!(!gw.complete(label(Token(99), "x")));
    }

    // ── Sections ────────────────────────────────────────────────────

    #[test]
    fn invalid_input_submits_nothing() {
        let mut gw = gateway();
        let fields: FieldValues = [("address".to_owned(), "abc".to_owned())].into();

        let err = gw.set_section(1, A, "dmx_address", "", &fields).unwrap_err();

        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(err.to_string(), "Invalid start address");
        assert_eq!(gw.transport().attempts, 0);
    }

    #[test]
    fn unknown_section_is_uniform() {
        let mut gw = gateway();
        let err = gw.get_section(1, A, "firmware", "").unwrap_err();
        assert_eq!(err.to_string(), "Unknown section: firmware");
        assert_eq!(gw.transport().attempts, 0);
    }

    #[test]
    fn rejected_first_step_fails_synchronously() {
        let mut gw = gateway();
        gw.transport_mut().disconnected = true;
        let err = gw.get_section(1, A, "device_label", "").unwrap_err();
        assert_eq!(err.to_string(), "Failed to send request, client isn't connected");
    }

    #[test]
    fn rejected_later_step_fails_through_the_reply() {
        let mut gw = gateway();
        let mut reply = gw.get_section(1, A, "device_info", "").unwrap();
        let (token, _) = last(&gw);

        gw.transport_mut().busy.insert(A);
        gw.complete(label(token, "1.2.0"));

        assert!(matches!(
            reply.try_take(),
            Some(Err(CoreError::BackendDisconnected))
        ));
        assert_eq!(gw.in_flight(), 0);
    }

    #[test]
    fn transactions_target_configured_sub_device() {
        let config = GatewayConfig {
            sub_device: 3,
            ..GatewayConfig::default()
        };
        let mut gw = Gateway::new(MockTransport::default(), config);
        let _reply = gw.get_section(1, A, "identify", "").unwrap();
        assert_eq!(last(&gw).1.sub_device, 3);
    }

    #[test]
    fn foreground_label_read_refreshes_registry() {
        let mut gw = Gateway::new(
            MockTransport::default(),
            GatewayConfig {
                resolve_labels: false,
                ..GatewayConfig::default()
            },
        );
        gw.reconcile_uid_list(1, [A]);
        let mut reply = gw.get_section(1, A, "device_label", "").unwrap();
        let (token, _) = last(&gw);
        gw.complete(label(token, "Dimmer"));

        let data = reply.try_take().unwrap().unwrap();
        assert_eq!(data.items[0].field.as_deref(), Some("label"));
        assert_eq!(gw.registry().entry(1, A).unwrap().device_label, "Dimmer");
        assert_eq!(
            gw.registry().entry(1, A).map(|e| e.manufacturer_label.as_str()),
            Some("")
        );
    }

    #[test]
    fn broadcast_read_yields_empty_section() {
        let mut gw = gateway();
        let mut reply = gw.get_section(1, A, "device_hours", "").unwrap();
        let (token, _) = last(&gw);
        gw.complete(Completion::new(token, ResponseStatus::broadcast(), RdmPayload::Empty));

        assert_eq!(reply.try_take().unwrap().unwrap(), SectionData::default());
    }

    #[test]
    fn sensor_value_without_a_reading_is_malformed() {
        let mut gw = gateway();
        let mut reply = gw.get_section(1, A, "sensor", "0").unwrap();
        let (token, _) = last(&gw);
        gw.complete(Completion::new(token, ResponseStatus::nacked(0), RdmPayload::Empty));

        let (token, tx) = last(&gw);
        assert_eq!(tx.command, RdmCommand::GetSensorValue { sensor: 0 });
        gw.complete(Completion::new(token, ResponseStatus::valid(), RdmPayload::Empty));

        let err = reply.try_take().unwrap().unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed response: unexpected payload for SENSOR_VALUE"
        );
        assert_eq!(gw.in_flight(), 0);
    }

    #[test]
    fn dropping_the_gateway_drops_replies() {
        let mut gw = gateway();
        let mut reply = gw.get_section(1, A, "identify", "").unwrap();
        assert!(reply.try_take().is_none());
        drop(gw);
        assert!(matches!(reply.try_take(), Some(Err(CoreError::ReplyDropped))));
    }
}
