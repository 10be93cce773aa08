// ── Attribute operation pipeline ──
//
// Each section operation is a small state machine. Starting one yields
// the first command plus the op's initial state; every completion feeds
// `SectionOp::advance`, which either asks for another transaction
// (`Step::Pending`) or finishes (`Step::Done` / `Step::Failed`). Partial
// results travel inside the op value, so each continuation owns them.

pub mod catalog;
mod device_info;
mod language;
mod read;
mod sensor;
mod software;

use rdmgate_api::{RdmCommand, RdmPayload};

use crate::classify::ClassifiedStatus;
use crate::error::CoreError;
use crate::model::{FieldValues, SectionData, SectionKind};
use crate::reply::Outcome;
use crate::store::LabelKind;

pub(crate) use catalog::CatalogOp;
pub(crate) use device_info::DeviceInfoOp;
pub(crate) use language::LanguageOp;
pub(crate) use read::ReadOp;
pub(crate) use sensor::SensorOp;
pub(crate) use software::BootSoftwareOp;

// ── Field names ─────────────────────────────────────────────────────

pub const ADDRESS_FIELD: &str = "address";
pub const HOURS_FIELD: &str = "hours";
pub const IDENTIFY_FIELD: &str = "identify";
pub const LABEL_FIELD: &str = "label";
pub const LANGUAGE_FIELD: &str = "language";
pub const RECORD_SENSOR_FIELD: &str = "record";

/// Lowest and highest DMX start address a device can be given.
pub const MIN_START_ADDRESS: u16 = 1;
pub const MAX_START_ADDRESS: u16 = 512;

// ── Step ────────────────────────────────────────────────────────────

/// What an operation wants after consuming a completion.
#[derive(Debug)]
pub(crate) enum Step {
    /// Issue `command` and resume `op` with its completion.
    Pending { command: RdmCommand, op: SectionOp },
    Done(Outcome),
    Failed(CoreError),
}

impl Step {
    fn next(command: RdmCommand, op: SectionOp) -> Self {
        Self::Pending { command, op }
    }

    /// Finish a single-response read: render on success, empty data on
    /// broadcast, error otherwise.
    fn section(
        status: ClassifiedStatus,
        render: impl FnOnce() -> Option<SectionData>,
    ) -> Self {
        match status {
            ClassifiedStatus::Valid => match render() {
                Some(data) => Self::Done(Outcome::Section(data)),
                None => Self::Failed(CoreError::Internal(
                    "completion payload did not match its command".into(),
                )),
            },
            ClassifiedStatus::BroadcastNoResponse => {
                Self::Done(Outcome::Section(SectionData::default()))
            }
            failed => Self::Failed(CoreError::protocol(failed)),
        }
    }
}

// ── Operations ──────────────────────────────────────────────────────

/// In-flight state of one frontend request.
#[derive(Debug)]
pub(crate) enum SectionOp {
    Read(ReadOp),
    Write,
    DeviceInfo(DeviceInfoOp),
    Language(LanguageOp),
    BootSoftware(BootSoftwareOp),
    Sensor(SensorOp),
    Catalog(CatalogOp),
    SupportedPids,
}

impl SectionOp {
    /// Consume a classified completion and decide what happens next.
    pub(crate) fn advance(self, status: ClassifiedStatus, payload: RdmPayload) -> Step {
        match self {
            Self::Read(op) => Step::section(status, || op.render(payload)),
            Self::Write => match status {
                ClassifiedStatus::Valid | ClassifiedStatus::BroadcastNoResponse => {
                    Step::Done(Outcome::Ack)
                }
                failed => Step::Failed(CoreError::protocol(failed)),
            },
            Self::DeviceInfo(op) => op.advance(status, payload),
            Self::Language(op) => op.advance(&status, payload),
            Self::BootSoftware(op) => op.advance(&status, payload),
            Self::Sensor(op) => op.advance(status, payload),
            Self::Catalog(op) => op.advance(status, payload),
            Self::SupportedPids => match (status, payload) {
                (ClassifiedStatus::Valid, RdmPayload::ParameterList(pids)) => {
                    Step::Done(Outcome::Pids(pids))
                }
                (ClassifiedStatus::BroadcastNoResponse, _) => Step::Done(Outcome::Pids(Vec::new())),
                (ClassifiedStatus::Valid, _) => Step::Failed(CoreError::Internal(
                    "completion payload did not match its command".into(),
                )),
                (failed, _) => Step::Failed(CoreError::protocol(failed)),
            },
        }
    }

    /// The registry label a successful completion of this op refreshes.
    pub(crate) fn learned_label(&self) -> Option<LabelKind> {
        match self {
            Self::Read(ReadOp::ManufacturerLabel) => Some(LabelKind::Manufacturer),
            Self::Read(ReadOp::DeviceLabel) => Some(LabelKind::Device),
            _ => None,
        }
    }
}

// ── Entry points ────────────────────────────────────────────────────

/// First command and initial state for reading `kind`.
pub(crate) fn begin_get(kind: SectionKind, hint: &str) -> Result<(RdmCommand, SectionOp), CoreError> {
    let read = |op: ReadOp| (op.command(), SectionOp::Read(op));
    Ok(match kind {
        SectionKind::DeviceInfo => DeviceInfoOp::begin(hint.contains('m')),
        SectionKind::ProductDetail => read(ReadOp::ProductDetail),
        SectionKind::ManufacturerLabel => read(ReadOp::ManufacturerLabel),
        SectionKind::DeviceLabel => read(ReadOp::DeviceLabel),
        SectionKind::Language => LanguageOp::begin(),
        SectionKind::BootSoftware => BootSoftwareOp::begin(),
        SectionKind::DmxAddress => read(ReadOp::DmxAddress),
        SectionKind::Sensor => SensorOp::begin(parse_sensor_hint(hint)?),
        SectionKind::DeviceHours => read(ReadOp::DeviceHours),
        SectionKind::LampHours => read(ReadOp::LampHours),
        SectionKind::Identify => read(ReadOp::Identify),
    })
}

/// Validate `fields` for writing `kind` and build the write command.
///
/// Validation happens entirely here, before anything is submitted.
pub(crate) fn begin_set(
    kind: SectionKind,
    hint: &str,
    fields: &FieldValues,
) -> Result<(RdmCommand, SectionOp), CoreError> {
    let field = |name: &str| fields.get(name).map(|v| v.trim().to_owned());

    let command = match kind {
        SectionKind::DeviceLabel => RdmCommand::SetDeviceLabel {
            label: fields.get(LABEL_FIELD).cloned().unwrap_or_default(),
        },
        SectionKind::Language => RdmCommand::SetLanguage {
            language: fields.get(LANGUAGE_FIELD).cloned().unwrap_or_default(),
        },
        SectionKind::DmxAddress => {
            let address = field(ADDRESS_FIELD)
                .and_then(|v| v.parse::<u16>().ok())
                .filter(|a| (MIN_START_ADDRESS..=MAX_START_ADDRESS).contains(a))
                .ok_or_else(|| CoreError::validation("Invalid start address"))?;
            RdmCommand::SetDmxStartAddress { address }
        }
        SectionKind::Sensor => RdmCommand::RecordSensors {
            sensor: parse_sensor_hint(hint)?,
        },
        SectionKind::DeviceHours => RdmCommand::SetDeviceHours {
            hours: field(HOURS_FIELD)
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| CoreError::validation("Invalid device hours"))?,
        },
        SectionKind::LampHours => RdmCommand::SetLampHours {
            hours: field(HOURS_FIELD)
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| CoreError::validation("Invalid lamp hours"))?,
        },
        SectionKind::Identify => RdmCommand::SetIdentify {
            on: field(IDENTIFY_FIELD).as_deref() == Some("1"),
        },
        SectionKind::DeviceInfo
        | SectionKind::ProductDetail
        | SectionKind::ManufacturerLabel
        | SectionKind::BootSoftware => {
            return Err(CoreError::UnknownSection {
                section: kind.id().to_owned(),
            });
        }
    };
    Ok((command, SectionOp::Write))
}

/// Section catalog: supported parameters, then the device descriptor.
pub(crate) fn begin_catalog() -> (RdmCommand, SectionOp) {
    CatalogOp::begin()
}

pub(crate) fn begin_supported_pids() -> (RdmCommand, SectionOp) {
    (RdmCommand::GetSupportedParameters, SectionOp::SupportedPids)
}

fn parse_sensor_hint(hint: &str) -> Result<u8, CoreError> {
    hint.trim()
        .parse()
        .map_err(|_| CoreError::validation("Invalid hint (sensor #)"))
}

/// `"{accumulated} ({reported})"`, or just the reported text when nothing
/// was accumulated.
pub(crate) fn compose(accumulated: &str, reported: impl std::fmt::Display) -> String {
    if accumulated.is_empty() {
        reported.to_string()
    } else {
        format!("{accumulated} ({reported})")
    }
}
