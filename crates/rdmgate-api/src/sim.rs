// ── Simulated bus ──
//
// An in-memory transport that answers transactions from a fixture of
// responders. It enforces the one-outstanding-per-destination rule and
// queues completions until the owner's loop polls them, so callers see
// the same accept-now/complete-later shape as a real transport.

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::command::{RdmCommand, Transaction};
use crate::error::Error;
use crate::payload::{DeviceDescriptor, RdmPayload, SensorDescriptor, SensorReading};
use crate::pid::Pid;
use crate::status::{NackReason, ResponseStatus};
use crate::transport::{Completion, RdmTransport, Token};
use crate::uid::Uid;

/// Longest label a responder stores (E1.20 fixes this at 32 bytes).
pub const MAX_LABEL_LEN: usize = 32;
/// Highest valid DMX start address.
pub const MAX_START_ADDRESS: u16 = 512;

// ── Fixture types ───────────────────────────────────────────────────

/// Top-level fixture: every universe the bus serves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub universes: Vec<UniverseFixture>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseFixture {
    pub id: u32,
    #[serde(default)]
    pub devices: Vec<DeviceFixture>,
}

/// One simulated responder. Absent optional values answer with
/// `NACK Unknown PID`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceFixture {
    pub uid: Uid,
    #[serde(default)]
    pub manufacturer_label: String,
    #[serde(default)]
    pub device_label: String,
    pub model_description: Option<String>,
    pub software_version_label: Option<String>,
    pub boot_software_version_label: Option<String>,
    pub boot_software_version_id: Option<u32>,
    pub language: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub supported_parameters: Option<Vec<u16>>,
    #[serde(default)]
    pub product_details: Vec<u16>,
    #[serde(default)]
    pub device_info: DeviceDescriptor,
    pub device_hours: Option<u32>,
    pub lamp_hours: Option<u32>,
    #[serde(default)]
    pub identify: bool,
    #[serde(default)]
    pub sensors: Vec<SensorFixture>,
    /// Parameters this responder always NACKs, with the reason to send.
    #[serde(default)]
    pub nacks: Vec<NackFixture>,
    /// Never answers: every transaction fails with a transport error.
    #[serde(default)]
    pub silent: bool,
}

impl DeviceFixture {
    pub fn new(uid: Uid) -> Self {
        Self {
            uid,
            manufacturer_label: String::new(),
            device_label: String::new(),
            model_description: None,
            software_version_label: None,
            boot_software_version_label: None,
            boot_software_version_id: None,
            language: None,
            languages: Vec::new(),
            supported_parameters: None,
            product_details: Vec::new(),
            device_info: DeviceDescriptor::default(),
            device_hours: None,
            lamp_hours: None,
            identify: false,
            sensors: Vec::new(),
            nacks: Vec::new(),
            silent: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorFixture {
    pub definition: SensorDescriptor,
    #[serde(default)]
    pub reading: SensorReading,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NackFixture {
    pub pid: Pid,
    pub reason: u16,
}

// ── Bus ─────────────────────────────────────────────────────────────

type Destination = (u32, Uid);

/// In-memory [`RdmTransport`] backed by a [`Fixture`].
#[derive(Debug)]
pub struct SimulatedBus {
    devices: BTreeMap<Destination, DeviceFixture>,
    outstanding: HashSet<Destination>,
    ready: VecDeque<(Destination, Completion)>,
    connected: bool,
    submitted: usize,
}

impl SimulatedBus {
    pub fn new(fixture: Fixture) -> Result<Self, Error> {
        let mut devices = BTreeMap::new();
        for universe in fixture.universes {
            for mut device in universe.devices {
                if device.device_info.sensor_count == 0 && !device.sensors.is_empty() {
                    device.device_info.sensor_count =
                        u8::try_from(device.sensors.len()).map_err(|_| Error::InvalidFixture {
                            field: format!("{}.sensors", device.uid),
                            reason: "more than 255 sensors".into(),
                        })?;
                }
                let key = (universe.id, device.uid);
                if devices.insert(key, device).is_some() {
                    return Err(Error::DuplicateDevice {
                        universe: universe.id,
                        uid: key.1.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            devices,
            outstanding: HashSet::new(),
            ready: VecDeque::new(),
            connected: true,
            submitted: 0,
        })
    }

    /// Universes with at least one responder.
    pub fn universes(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.devices.keys().map(|(u, _)| *u).collect();
        ids.dedup();
        ids
    }

    /// Responders present on a universe, in UID order.
    pub fn uids(&self, universe: u32) -> Vec<Uid> {
        self.devices
            .keys()
            .filter(|(u, _)| *u == universe)
            .map(|(_, uid)| *uid)
            .collect()
    }

    pub fn device(&self, universe: u32, uid: Uid) -> Option<&DeviceFixture> {
        self.devices.get(&(universe, uid))
    }

    /// Simulate losing (or regaining) the link: a disconnected bus rejects
    /// every submission.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Number of accepted submissions so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn is_idle(&self) -> bool {
        self.ready.is_empty()
    }

    /// Hand the oldest finished transaction back to the caller.
    pub fn poll_completion(&mut self) -> Option<Completion> {
        let (destination, completion) = self.ready.pop_front()?;
        self.outstanding.remove(&destination);
        Some(completion)
    }

    fn respond(&mut self, transaction: &Transaction) -> (ResponseStatus, RdmPayload) {
        let Some(device) = self
            .devices
            .get_mut(&(transaction.universe, transaction.uid))
        else {
            return (
                ResponseStatus::transport_error(format!("no response from {}", transaction.uid)),
                RdmPayload::Empty,
            );
        };
        if device.silent {
            return (
                ResponseStatus::transport_error("response timed out"),
                RdmPayload::Empty,
            );
        }

        let pid = transaction.command.pid();
        if let Some(nack) = device.nacks.iter().find(|n| n.pid == pid) {
            return (ResponseStatus::nacked(nack.reason), RdmPayload::Empty);
        }

        match answer(device, &transaction.command) {
            Ok(payload) => (ResponseStatus::valid(), payload),
            Err(reason) => (ResponseStatus::nacked(reason as u16), RdmPayload::Empty),
        }
    }
}

impl RdmTransport for SimulatedBus {
    fn submit(&mut self, token: Token, transaction: Transaction) -> bool {
        let destination = (transaction.universe, transaction.uid);
        if !self.connected {
            debug!(%token, "bus disconnected, rejecting");
            return false;
        }
        if self.outstanding.contains(&destination) {
            debug!(%token, uid = %transaction.uid, "destination busy, rejecting");
            return false;
        }

        let (status, payload) = self.respond(&transaction);
        trace!(
            %token,
            universe = transaction.universe,
            uid = %transaction.uid,
            pid = %transaction.command.pid(),
            "queued simulated response"
        );
        self.outstanding.insert(destination);
        self.ready
            .push_back((destination, Completion::new(token, status, payload)));
        self.submitted += 1;
        true
    }
}

fn known<T: Clone>(value: Option<&T>) -> Result<T, NackReason> {
    value.cloned().ok_or(NackReason::UnknownPid)
}

fn answer(device: &mut DeviceFixture, command: &RdmCommand) -> Result<RdmPayload, NackReason> {
    let payload = match command {
        RdmCommand::GetSupportedParameters => {
            RdmPayload::ParameterList(known(device.supported_parameters.as_ref())?)
        }
        RdmCommand::GetDeviceInfo => RdmPayload::DeviceInfo(device.device_info.clone()),
        RdmCommand::GetProductDetailIdList => {
            RdmPayload::ParameterList(device.product_details.clone())
        }
        RdmCommand::GetDeviceModelDescription => {
            RdmPayload::Label(known(device.model_description.as_ref())?)
        }
        RdmCommand::GetManufacturerLabel => RdmPayload::Label(device.manufacturer_label.clone()),
        RdmCommand::GetDeviceLabel => RdmPayload::Label(device.device_label.clone()),
        RdmCommand::GetLanguageCapabilities => RdmPayload::LanguageList(device.languages.clone()),
        RdmCommand::GetLanguage => RdmPayload::Label(known(device.language.as_ref())?),
        RdmCommand::GetSoftwareVersionLabel => {
            RdmPayload::Label(known(device.software_version_label.as_ref())?)
        }
        RdmCommand::GetBootSoftwareVersionId => {
            RdmPayload::BootVersion(known(device.boot_software_version_id.as_ref())?)
        }
        RdmCommand::GetBootSoftwareVersionLabel => {
            RdmPayload::Label(known(device.boot_software_version_label.as_ref())?)
        }
        RdmCommand::GetDmxStartAddress => {
            RdmPayload::StartAddress(device.device_info.dmx_start_address)
        }
        RdmCommand::GetSensorDefinition { sensor } => {
            RdmPayload::SensorDefinition(sensor_at(device, *sensor)?.definition.clone())
        }
        RdmCommand::GetSensorValue { sensor } => {
            RdmPayload::SensorValue(sensor_at(device, *sensor)?.reading)
        }
        RdmCommand::GetDeviceHours => RdmPayload::Hours(known(device.device_hours.as_ref())?),
        RdmCommand::GetLampHours => RdmPayload::Hours(known(device.lamp_hours.as_ref())?),
        RdmCommand::GetIdentify => RdmPayload::Identify(device.identify),

        RdmCommand::SetDeviceLabel { label } => {
            if label.len() > MAX_LABEL_LEN {
                return Err(NackReason::FormatError);
            }
            device.device_label.clone_from(label);
            RdmPayload::Empty
        }
        RdmCommand::SetLanguage { language } => {
            if !device.languages.is_empty() && !device.languages.contains(language) {
                return Err(NackReason::DataOutOfRange);
            }
            device.language = Some(language.clone());
            RdmPayload::Empty
        }
        RdmCommand::SetDmxStartAddress { address } => {
            if *address == 0 || *address > MAX_START_ADDRESS {
                return Err(NackReason::DataOutOfRange);
            }
            device.device_info.dmx_start_address = *address;
            RdmPayload::Empty
        }
        RdmCommand::RecordSensors { sensor } => {
            let index = usize::from(*sensor);
            let fixture = device
                .sensors
                .get_mut(index)
                .ok_or(NackReason::DataOutOfRange)?;
            fixture.reading.recorded = fixture.reading.present_value;
            RdmPayload::Empty
        }
        RdmCommand::SetDeviceHours { hours } => {
            known(device.device_hours.as_ref())?;
            device.device_hours = Some(*hours);
            RdmPayload::Empty
        }
        RdmCommand::SetLampHours { hours } => {
            known(device.lamp_hours.as_ref())?;
            device.lamp_hours = Some(*hours);
            RdmPayload::Empty
        }
        RdmCommand::SetIdentify { on } => {
            device.identify = *on;
            RdmPayload::Empty
        }
    };
    Ok(payload)
}

fn sensor_at(device: &DeviceFixture, sensor: u8) -> Result<&SensorFixture, NackReason> {
    device
        .sensors
        .get(usize::from(sensor))
        .ok_or(NackReason::DataOutOfRange)
}
