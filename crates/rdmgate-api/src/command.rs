// ── Commands ──
//
// Every GET/SET the gateway can ask of a device. A `Transaction` is a
// command bound to its destination; it is the unit a transport accepts.

use crate::pid::Pid;
use crate::uid::Uid;

/// The root device of a responder.
pub const ROOT_DEVICE: u16 = 0;

/// A single addressed read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdmCommand {
    // ── GET ──────────────────────────────────────────────────────────
    GetSupportedParameters,
    GetDeviceInfo,
    GetProductDetailIdList,
    GetDeviceModelDescription,
    GetManufacturerLabel,
    GetDeviceLabel,
    GetLanguageCapabilities,
    GetLanguage,
    GetSoftwareVersionLabel,
    GetBootSoftwareVersionId,
    GetBootSoftwareVersionLabel,
    GetDmxStartAddress,
    GetSensorDefinition { sensor: u8 },
    GetSensorValue { sensor: u8 },
    GetDeviceHours,
    GetLampHours,
    GetIdentify,

    // ── SET ──────────────────────────────────────────────────────────
    SetDeviceLabel { label: String },
    SetLanguage { language: String },
    SetDmxStartAddress { address: u16 },
    RecordSensors { sensor: u8 },
    SetDeviceHours { hours: u32 },
    SetLampHours { hours: u32 },
    SetIdentify { on: bool },
}

impl RdmCommand {
    /// The parameter this command addresses.
    pub fn pid(&self) -> Pid {
        match self {
            Self::GetSupportedParameters => Pid::SupportedParameters,
            Self::GetDeviceInfo => Pid::DeviceInfo,
            Self::GetProductDetailIdList => Pid::ProductDetailIdList,
            Self::GetDeviceModelDescription => Pid::DeviceModelDescription,
            Self::GetManufacturerLabel => Pid::ManufacturerLabel,
            Self::GetDeviceLabel | Self::SetDeviceLabel { .. } => Pid::DeviceLabel,
            Self::GetLanguageCapabilities => Pid::LanguageCapabilities,
            Self::GetLanguage | Self::SetLanguage { .. } => Pid::Language,
            Self::GetSoftwareVersionLabel => Pid::SoftwareVersionLabel,
            Self::GetBootSoftwareVersionId => Pid::BootSoftwareVersionId,
            Self::GetBootSoftwareVersionLabel => Pid::BootSoftwareVersionLabel,
            Self::GetDmxStartAddress | Self::SetDmxStartAddress { .. } => Pid::DmxStartAddress,
            Self::GetSensorDefinition { .. } => Pid::SensorDefinition,
            Self::GetSensorValue { .. } => Pid::SensorValue,
            Self::RecordSensors { .. } => Pid::RecordSensors,
            Self::GetDeviceHours | Self::SetDeviceHours { .. } => Pid::DeviceHours,
            Self::GetLampHours | Self::SetLampHours { .. } => Pid::LampHours,
            Self::GetIdentify | Self::SetIdentify { .. } => Pid::IdentifyDevice,
        }
    }

    /// Returns `true` for SET-class commands.
    pub fn is_set(&self) -> bool {
        matches!(
            self,
            Self::SetDeviceLabel { .. }
                | Self::SetLanguage { .. }
                | Self::SetDmxStartAddress { .. }
                | Self::RecordSensors { .. }
                | Self::SetDeviceHours { .. }
                | Self::SetLampHours { .. }
                | Self::SetIdentify { .. }
        )
    }
}

/// A command bound to its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub universe: u32,
    pub uid: Uid,
    pub sub_device: u16,
    pub command: RdmCommand,
}

impl Transaction {
    pub fn new(universe: u32, uid: Uid, command: RdmCommand) -> Self {
        Self {
            universe,
            uid,
            sub_device: ROOT_DEVICE,
            command,
        }
    }

    #[must_use]
    pub fn with_sub_device(mut self, sub_device: u16) -> Self {
        self.sub_device = sub_device;
        self
    }
}
