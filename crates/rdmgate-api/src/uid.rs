// ── Device identity ──
//
// A UID pairs an ESTA manufacturer id with a device id. Ordering is
// numeric, manufacturer first, which matches the 48-bit wire value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Unique RDM device identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid {
    manufacturer_id: u16,
    device_id: u32,
}

impl Uid {
    pub const fn new(manufacturer_id: u16, device_id: u32) -> Self {
        Self {
            manufacturer_id,
            device_id,
        }
    }

    pub const fn manufacturer_id(&self) -> u16 {
        self.manufacturer_id
    }

    pub const fn device_id(&self) -> u32 {
        self.device_id
    }

    /// The 48-bit value as carried on the wire.
    pub fn as_u64(&self) -> u64 {
        (u64::from(self.manufacturer_id) << 32) | u64::from(self.device_id)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:08x}", self.manufacturer_id, self.device_id)
    }
}

impl FromStr for Uid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidUid {
            input: s.to_owned(),
            reason: reason.to_owned(),
        };

        let (manufacturer, device) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected manufacturer:device"))?;
        if manufacturer.is_empty() || manufacturer.len() > 4 {
            return Err(invalid("manufacturer id must be 1-4 hex digits"));
        }
        if device.is_empty() || device.len() > 8 {
            return Err(invalid("device id must be 1-8 hex digits"));
        }

        let manufacturer_id =
            u16::from_str_radix(manufacturer, 16).map_err(|_| invalid("bad manufacturer id"))?;
        let device_id = u32::from_str_radix(device, 16).map_err(|_| invalid("bad device id"))?;
        Ok(Self::new(manufacturer_id, device_id))
    }
}

impl Serialize for Uid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Uid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
