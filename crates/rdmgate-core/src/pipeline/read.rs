// Single-transaction section reads.

use rdmgate_api::{RdmCommand, RdmPayload, text};

use super::{
    ADDRESS_FIELD, HOURS_FIELD, IDENTIFY_FIELD, LABEL_FIELD, MAX_START_ADDRESS,
    MIN_START_ADDRESS,
};
use crate::model::{AttributeItem, ItemValue, SectionData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadOp {
    ProductDetail,
    ManufacturerLabel,
    DeviceLabel,
    DmxAddress,
    DeviceHours,
    LampHours,
    Identify,
}

impl ReadOp {
    pub(crate) fn command(self) -> RdmCommand {
        match self {
            Self::ProductDetail => RdmCommand::GetProductDetailIdList,
            Self::ManufacturerLabel => RdmCommand::GetManufacturerLabel,
            Self::DeviceLabel => RdmCommand::GetDeviceLabel,
            Self::DmxAddress => RdmCommand::GetDmxStartAddress,
            Self::DeviceHours => RdmCommand::GetDeviceHours,
            Self::LampHours => RdmCommand::GetLampHours,
            Self::Identify => RdmCommand::GetIdentify,
        }
    }

    /// Render a valid response. `None` if the payload is not this read's shape.
    pub(crate) fn render(self, payload: RdmPayload) -> Option<SectionData> {
        let item = match (self, payload) {
            (Self::ProductDetail, RdmPayload::ParameterList(ids)) => {
                let names: Vec<&str> = ids.iter().filter_map(|id| text::product_detail(*id)).collect();
                AttributeItem::text("Product Detail IDs", names.join(", "))
            }
            (Self::ManufacturerLabel, RdmPayload::Label(label)) => {
                AttributeItem::text("Manufacturer Label", label)
            }
            (Self::DeviceLabel, RdmPayload::Label(label)) => {
                AttributeItem::text("Device Label", label).editable(LABEL_FIELD)
            }
            (Self::DmxAddress, RdmPayload::StartAddress(address)) => AttributeItem {
                label: "DMX Start Address".into(),
                value: ItemValue::UInt {
                    value: address.into(),
                    min: Some(MIN_START_ADDRESS.into()),
                    max: Some(MAX_START_ADDRESS.into()),
                },
                field: Some(ADDRESS_FIELD.into()),
            },
            (Self::DeviceHours, RdmPayload::Hours(hours)) => {
                AttributeItem::uint("Device Hours", hours).editable(HOURS_FIELD)
            }
            (Self::LampHours, RdmPayload::Hours(hours)) => {
                AttributeItem::uint("Lamp Hours", hours).editable(HOURS_FIELD)
            }
            (Self::Identify, RdmPayload::Identify(on)) => AttributeItem {
                label: "Identify Mode".into(),
                value: ItemValue::Bool(on),
                field: Some(IDENTIFY_FIELD.into()),
            },
            _ => return None,
        };
        Some(SectionData::new(vec![item]))
    }
}
