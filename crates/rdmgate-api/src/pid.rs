// ── Parameter ids ──
//
// The E1.20 parameters this gateway issues, with their wire numbers.

use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr};

/// An RDM parameter id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, FromRepr, Serialize, Deserialize,
)]
#[repr(u16)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pid {
    SupportedParameters = 0x0050,
    DeviceInfo = 0x0060,
    ProductDetailIdList = 0x0070,
    DeviceModelDescription = 0x0080,
    ManufacturerLabel = 0x0081,
    DeviceLabel = 0x0082,
    LanguageCapabilities = 0x00A0,
    Language = 0x00B0,
    SoftwareVersionLabel = 0x00C0,
    BootSoftwareVersionId = 0x00C1,
    BootSoftwareVersionLabel = 0x00C2,
    DmxStartAddress = 0x00F0,
    SensorDefinition = 0x0200,
    SensorValue = 0x0201,
    RecordSensors = 0x0202,
    DeviceHours = 0x0400,
    LampHours = 0x0401,
    IdentifyDevice = 0x1000,
}

impl Pid {
    pub const fn value(self) -> u16 {
        self as u16
    }
}

impl From<Pid> for u16 {
    fn from(pid: Pid) -> Self {
        pid.value()
    }
}
