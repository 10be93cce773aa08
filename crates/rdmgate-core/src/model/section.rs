// ── Sections ──
//
// A section is a named group of device attributes. `SectionKind` is the
// closed set the gateway knows; ids on the wire are its snake_case names.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Field values submitted with a set request, keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

/// Every section the gateway can read or write.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SectionKind {
    DeviceInfo,
    ProductDetail,
    ManufacturerLabel,
    DeviceLabel,
    Language,
    BootSoftware,
    DmxAddress,
    Sensor,
    DeviceHours,
    LampHours,
    Identify,
}

impl SectionKind {
    /// Wire id, e.g. `"dmx_address"`.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Default display name. Sensor sections are renamed per index by the
    /// catalog builder.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::DeviceInfo => "Device Info",
            Self::ProductDetail => "Product Details",
            Self::ManufacturerLabel => "Manufacturer Label",
            Self::DeviceLabel => "Device Label",
            Self::Language => "Language",
            Self::BootSoftware => "Boot Software Version",
            Self::DmxAddress => "DMX Start Address",
            Self::Sensor => "Sensor",
            Self::DeviceHours => "Device Hours",
            Self::LampHours => "Lamp Hours",
            Self::Identify => "Identify Mode",
        }
    }

    /// Whether a set operation exists for this section.
    pub fn is_writable(self) -> bool {
        matches!(
            self,
            Self::DeviceLabel
                | Self::Language
                | Self::DmxAddress
                | Self::Sensor
                | Self::DeviceHours
                | Self::LampHours
                | Self::Identify
        )
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An entry in a device's section catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDescriptor {
    pub id: String,
    pub name: String,
    /// Opaque addressing data echoed back on get/set (e.g. a sensor index).
    pub hint: String,
}

impl SectionDescriptor {
    pub fn new(kind: SectionKind, hint: impl Into<String>) -> Self {
        Self::named(kind, kind.display_name(), hint)
    }

    pub fn named(kind: SectionKind, name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            id: kind.id().to_owned(),
            name: name.into(),
            hint: hint.into(),
        }
    }
}

/// Value of a single rendered attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ItemValue {
    Text(String),
    UInt {
        value: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<u64>,
    },
    Bool(bool),
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
    /// Carried through the frontend for write-back but never shown.
    Hidden(String),
}

impl ItemValue {
    pub fn uint(value: impl Into<u64>) -> Self {
        Self::UInt {
            value: value.into(),
            min: None,
            max: None,
        }
    }

    /// Plain-text rendering for table output.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) | Self::Hidden(text) => text.clone(),
            Self::UInt { value, .. } => value.to_string(),
            Self::Bool(on) => if *on { "on" } else { "off" }.to_owned(),
            Self::Select { options, selected } => selected
                .and_then(|i| options.get(i))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// A rendered attribute: label, value, and the edit field it maps to (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeItem {
    pub label: String,
    pub value: ItemValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AttributeItem {
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: ItemValue::Text(value.into()),
            field: None,
        }
    }

    pub fn uint(label: impl Into<String>, value: impl Into<u64>) -> Self {
        Self {
            label: label.into(),
            value: ItemValue::uint(value),
            field: None,
        }
    }

    #[must_use]
    pub fn editable(mut self, field: &str) -> Self {
        self.field = Some(field.to_owned());
        self
    }
}

/// The result of a section read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionData {
    pub items: Vec<AttributeItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_button: Option<String>,
}

impl SectionData {
    pub fn new(items: Vec<AttributeItem>) -> Self {
        Self {
            items,
            save_button: None,
        }
    }

    /// Look up an item by label.
    pub fn item(&self, label: &str) -> Option<&AttributeItem> {
        self.items.iter().find(|i| i.label == label)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_round_trip_through_from_str() {
        for kind in SectionKind::iter() {
            assert_eq!(SectionKind::from_str(kind.id()).unwrap(), kind);
        }
        assert_eq!(SectionKind::DmxAddress.id(), "dmx_address");
        assert!(SectionKind::from_str("firmware").is_err());
    }

    #[test]
    fn item_value_serializes_tagged() {
        let json = serde_json::to_value(ItemValue::Bool(true)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "bool", "value": true}));
    }

    #[test]
    fn select_displays_selected_option() {
        let value = ItemValue::Select {
            options: vec!["en".into(), "de".into()],
            selected: Some(1),
        };
        assert_eq!(value.display(), "de");
        let none = ItemValue::Select {
            options: vec!["en".into()],
            selected: None,
        };
        assert_eq!(none.display(), "");
    }
}
