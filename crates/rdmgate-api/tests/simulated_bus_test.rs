#![allow(clippy::unwrap_used)]
// Integration tests for `SimulatedBus` driven from a TOML fixture.

use pretty_assertions::assert_eq;

use rdmgate_api::{
    Completion, Fixture, RdmCommand, RdmPayload, RdmTransport, ResponseStatus, SimulatedBus,
    Token, Transaction, Uid,
};

const FIXTURE: &str = r#"
[[universes]]
id = 1

[[universes.devices]]
uid = "7a70:00000001"
manufacturer_label = "Open Lighting"
device_label = "Dimmer"
software_version_label = "1.2.0"
languages = ["en", "de"]
language = "en"
supported_parameters = [0x0081, 0x0082, 0x00f0]

[universes.devices.device_info]
dmx_footprint = 4
dmx_start_address = 1

[[universes.devices.nacks]]
pid = "DEVICE_HOURS"
reason = 4

[[universes.devices]]
uid = "7a70:00000002"
silent = true

[[universes]]
id = 9
"#;

// ── Helpers ─────────────────────────────────────────────────────────

fn setup() -> SimulatedBus {
    let fixture: Fixture = toml::from_str(FIXTURE).unwrap();
    SimulatedBus::new(fixture).unwrap()
}

fn run(bus: &mut SimulatedBus, uid: Uid, command: RdmCommand) -> Completion {
    assert!(bus.submit(Token(0), Transaction::new(1, uid, command)));
    bus.poll_completion().unwrap()
}

const DIMMER: Uid = Uid::new(0x7a70, 1);
const SILENT: Uid = Uid::new(0x7a70, 2);

// ── Discovery stand-in ──────────────────────────────────────────────

#[test]
fn test_uids_are_listed_per_universe() {
    let bus = setup();
    assert_eq!(bus.uids(1), vec![DIMMER, SILENT]);
    assert!(bus.uids(9).is_empty());
    assert_eq!(bus.universes(), vec![1]);
}

// ── GET / SET ───────────────────────────────────────────────────────

#[test]
fn test_set_then_get_start_address() {
    let mut bus = setup();

    let set = run(&mut bus, DIMMER, RdmCommand::SetDmxStartAddress { address: 100 });
    assert_eq!(set.status, ResponseStatus::valid());
    assert_eq!(set.payload, RdmPayload::Empty);

    let get = run(&mut bus, DIMMER, RdmCommand::GetDmxStartAddress);
    assert_eq!(get.payload, RdmPayload::StartAddress(100));
}

#[test]
fn test_out_of_range_address_is_nacked() {
    let mut bus = setup();
    let done = run(&mut bus, DIMMER, RdmCommand::SetDmxStartAddress { address: 600 });
    assert_eq!(done.status, ResponseStatus::nacked(6));
}

#[test]
fn test_language_must_be_a_capability() {
    let mut bus = setup();
    let done = run(
        &mut bus,
        DIMMER,
        RdmCommand::SetLanguage {
            language: "fr".into(),
        },
    );
    assert_eq!(done.status, ResponseStatus::nacked(6));

    let done = run(
        &mut bus,
        DIMMER,
        RdmCommand::SetLanguage {
            language: "de".into(),
        },
    );
    assert_eq!(done.status, ResponseStatus::valid());
    assert_eq!(bus.device(1, DIMMER).unwrap().language.as_deref(), Some("de"));
}

#[test]
fn test_configured_nack_wins() {
    let mut bus = setup();
    let done = run(&mut bus, DIMMER, RdmCommand::GetDeviceHours);
    assert_eq!(done.status, ResponseStatus::nacked(4));
}

// ── Failure modes ───────────────────────────────────────────────────

#[test]
fn test_silent_device_reports_transport_error() {
    let mut bus = setup();
    let done = run(&mut bus, SILENT, RdmCommand::GetDeviceLabel);
    assert_eq!(done.status, ResponseStatus::transport_error("response timed out"));
}

#[test]
fn test_disconnected_bus_rejects_everything() {
    let mut bus = setup();
    bus.set_connected(false);
    assert!(!bus.submit(
        Token(1),
        Transaction::new(1, DIMMER, RdmCommand::GetDeviceLabel)
    ));
    assert_eq!(bus.submitted(), 0);
    assert!(bus.is_idle());
}

#[test]
fn test_completions_keep_submission_order_across_devices() {
    let mut bus = setup();
    assert!(bus.submit(Token(1), Transaction::new(1, DIMMER, RdmCommand::GetIdentify)));
    assert!(bus.submit(Token(2), Transaction::new(1, SILENT, RdmCommand::GetIdentify)));

    let order: Vec<Token> = std::iter::from_fn(|| bus.poll_completion())
        .map(|c| c.token)
        .collect();
    assert_eq!(order, vec![Token(1), Token(2)]);
}
