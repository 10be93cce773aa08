// ── Response payloads ──
//
// Typed bodies delivered alongside a completion. Which variant a command
// produces is fixed by its PID; see `RdmPayload::fits`.

use serde::{Deserialize, Serialize};

use crate::command::RdmCommand;

/// Sensor supports a recorded (snapshot) value.
pub const SENSOR_RECORDED_VALUE: u8 = 0x01;
/// Sensor tracks lowest/highest detected values.
pub const SENSOR_RECORDED_RANGE_VALUES: u8 = 0x02;

/// The DEVICE_INFO response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceDescriptor {
    pub protocol_version_high: u8,
    pub protocol_version_low: u8,
    pub device_model: u16,
    pub product_category: u16,
    pub software_version: u32,
    pub dmx_footprint: u16,
    pub current_personality: u8,
    pub personality_count: u8,
    pub dmx_start_address: u16,
    pub sub_device_count: u16,
    pub sensor_count: u8,
}

/// The SENSOR_DEFINITION response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorDescriptor {
    pub sensor_number: u8,
    pub sensor_type: u8,
    pub unit: u8,
    pub prefix: u8,
    pub range_min: i16,
    pub range_max: i16,
    pub normal_min: i16,
    pub normal_max: i16,
    pub recorded_value_support: u8,
    pub description: String,
}

impl SensorDescriptor {
    pub fn supports_recorded_value(&self) -> bool {
        self.recorded_value_support & SENSOR_RECORDED_VALUE != 0
    }

    pub fn supports_recorded_range(&self) -> bool {
        self.recorded_value_support & SENSOR_RECORDED_RANGE_VALUES != 0
    }
}

/// The SENSOR_VALUE response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorReading {
    pub sensor_number: u8,
    pub present_value: i16,
    pub lowest: i16,
    pub highest: i16,
    pub recorded: i16,
}

/// Body of a completed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdmPayload {
    /// No body: SET acknowledgements and failed transactions.
    Empty,
    Label(String),
    ParameterList(Vec<u16>),
    DeviceInfo(DeviceDescriptor),
    LanguageList(Vec<String>),
    BootVersion(u32),
    StartAddress(u16),
    SensorDefinition(SensorDescriptor),
    SensorValue(SensorReading),
    Hours(u32),
    Identify(bool),
}

impl RdmPayload {
    /// Whether this payload is the shape a valid response to `command` carries.
    pub fn fits(&self, command: &RdmCommand) -> bool {
        match command {
            RdmCommand::GetSupportedParameters | RdmCommand::GetProductDetailIdList => {
                matches!(self, Self::ParameterList(_))
            }
            RdmCommand::GetDeviceInfo => matches!(self, Self::DeviceInfo(_)),
            RdmCommand::GetDeviceModelDescription
            | RdmCommand::GetManufacturerLabel
            | RdmCommand::GetDeviceLabel
            | RdmCommand::GetLanguage
            | RdmCommand::GetSoftwareVersionLabel
            | RdmCommand::GetBootSoftwareVersionLabel => matches!(self, Self::Label(_)),
            RdmCommand::GetLanguageCapabilities => matches!(self, Self::LanguageList(_)),
            RdmCommand::GetBootSoftwareVersionId => matches!(self, Self::BootVersion(_)),
            RdmCommand::GetDmxStartAddress => matches!(self, Self::StartAddress(_)),
            RdmCommand::GetSensorDefinition { .. } => matches!(self, Self::SensorDefinition(_)),
            RdmCommand::GetSensorValue { .. } => matches!(self, Self::SensorValue(_)),
            RdmCommand::RecordSensors { .. } => {
                matches!(self, Self::SensorValue(_) | Self::Empty)
            }
            RdmCommand::GetDeviceHours | RdmCommand::GetLampHours => {
                matches!(self, Self::Hours(_))
            }
            RdmCommand::GetIdentify => matches!(self, Self::Identify(_)),
            RdmCommand::SetDeviceLabel { .. }
            | RdmCommand::SetLanguage { .. }
            | RdmCommand::SetDmxStartAddress { .. }
            | RdmCommand::SetDeviceHours { .. }
            | RdmCommand::SetLampHours { .. }
            | RdmCommand::SetIdentify { .. } => matches!(self, Self::Empty),
        }
    }
}
