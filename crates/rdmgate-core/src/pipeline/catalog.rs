// ── Section catalog ──
//
// Which sections to offer for a device, derived from its supported PID
// list and (when available) its DEVICE_INFO descriptor.

use std::collections::BTreeSet;

use rdmgate_api::{DeviceDescriptor, Pid, RdmCommand, RdmPayload};
use tracing::debug;

use super::{SectionOp, Step};
use crate::classify::ClassifiedStatus;
use crate::error::CoreError;
use crate::model::{SectionDescriptor, SectionKind};
use crate::reply::Outcome;

/// Hint marking that DEVICE_MODEL_DESCRIPTION is worth reading.
pub const MODEL_HINT: &str = "m";

/// Build the ordered section list for a device.
///
/// Device info and identify are always offered. Each supported PID with a
/// section of its own adds it; either boot software PID adds the boot
/// software section. With a descriptor, a non-zero footprint guarantees a
/// DMX address section and a non-zero sensor count adds one section per
/// sensor (if both sensor PIDs are supported). The result is sorted by
/// display name.
pub fn build_catalog(pids: &[u16], device: Option<&DeviceDescriptor>) -> Vec<SectionDescriptor> {
    let supported: BTreeSet<Pid> = pids.iter().filter_map(|p| Pid::from_repr(*p)).collect();

    let hint = if supported.contains(&Pid::DeviceModelDescription) {
        MODEL_HINT
    } else {
        ""
    };
    let mut sections = vec![
        SectionDescriptor::new(SectionKind::DeviceInfo, hint),
        SectionDescriptor::new(SectionKind::Identify, hint),
    ];

    let mut dmx_address_added = false;
    let mut boot_software = false;
    for pid in &supported {
        let kind = match pid {
            Pid::ManufacturerLabel => SectionKind::ManufacturerLabel,
            Pid::DeviceLabel => SectionKind::DeviceLabel,
            Pid::Language => SectionKind::Language,
            Pid::DmxStartAddress => {
                dmx_address_added = true;
                SectionKind::DmxAddress
            }
            Pid::DeviceHours => SectionKind::DeviceHours,
            Pid::LampHours => SectionKind::LampHours,
            Pid::ProductDetailIdList => SectionKind::ProductDetail,
            Pid::BootSoftwareVersionId | Pid::BootSoftwareVersionLabel => {
                boot_software = true;
                continue;
            }
            _ => continue,
        };
        sections.push(SectionDescriptor::new(kind, ""));
    }

    if boot_software {
        sections.push(SectionDescriptor::new(SectionKind::BootSoftware, ""));
    }

    if let Some(device) = device {
        if device.dmx_footprint > 0 && !dmx_address_added {
            sections.push(SectionDescriptor::new(SectionKind::DmxAddress, ""));
        }
        if device.sensor_count > 0
            && supported.contains(&Pid::SensorDefinition)
            && supported.contains(&Pid::SensorValue)
        {
            for index in 0..device.sensor_count {
                sections.push(SectionDescriptor::named(
                    SectionKind::Sensor,
                    format!("Sensor {}", u16::from(index) + 1),
                    index.to_string(),
                ));
            }
        }
    }

    sections.sort_by(|a, b| a.name.cmp(&b.name));
    sections
}

/// SUPPORTED_PARAMETERS, then DEVICE_INFO.
#[derive(Debug)]
pub(crate) enum CatalogOp {
    SupportedParameters,
    DeviceInfo { pids: Vec<u16> },
}

impl CatalogOp {
    pub(crate) fn begin() -> (RdmCommand, SectionOp) {
        (
            RdmCommand::GetSupportedParameters,
            SectionOp::Catalog(Self::SupportedParameters),
        )
    }

    pub(crate) fn advance(self, status: ClassifiedStatus, payload: RdmPayload) -> Step {
        match self {
            Self::SupportedParameters => {
                let pids = match (status, payload) {
                    (ClassifiedStatus::Valid, RdmPayload::ParameterList(pids)) => pids,
                    // Devices without SUPPORTED_PARAMETERS still get the base sections.
                    (ClassifiedStatus::Nacked(_) | ClassifiedStatus::BroadcastNoResponse, _) => {
                        Vec::new()
                    }
                    (ClassifiedStatus::Valid, _) => {
                        return Step::Failed(CoreError::Internal(
                            "completion payload did not match its command".into(),
                        ));
                    }
                    (failed, _) => return Step::Failed(CoreError::protocol(failed)),
                };
                Step::next(
                    RdmCommand::GetDeviceInfo,
                    SectionOp::Catalog(Self::DeviceInfo { pids }),
                )
            }
            Self::DeviceInfo { pids } => {
                let device = match (status, payload) {
                    (ClassifiedStatus::Valid, RdmPayload::DeviceInfo(device)) => Some(device),
                    (status, _) => {
                        debug!(error = %status.message(), "catalog built without device info");
                        None
                    }
                };
                Step::Done(Outcome::Sections(build_catalog(&pids, device.as_ref())))
            }
        }
    }
}
