// ── Device info ──
//
// SOFTWARE_VERSION_LABEL, then DEVICE_MODEL_DESCRIPTION when the hint asks
// for it, then DEVICE_INFO. The two label reads only decorate the final
// descriptor, so their failures are ignored.

use rdmgate_api::{DeviceDescriptor, RdmCommand, RdmPayload, text};

use super::{SectionOp, Step, compose};
use crate::classify::ClassifiedStatus;
use crate::model::{AttributeItem, SectionData};

/// Labels gathered before the descriptor arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DeviceInfoLabels {
    pub software_version: String,
    pub device_model: String,
}

#[derive(Debug)]
pub(crate) enum DeviceInfoOp {
    SoftwareVersion { want_model: bool },
    Model { labels: DeviceInfoLabels },
    Descriptor { labels: DeviceInfoLabels },
}

impl DeviceInfoOp {
    pub(crate) fn begin(want_model: bool) -> (RdmCommand, SectionOp) {
        (
            RdmCommand::GetSoftwareVersionLabel,
            SectionOp::DeviceInfo(Self::SoftwareVersion { want_model }),
        )
    }

    pub(crate) fn advance(self, status: ClassifiedStatus, payload: RdmPayload) -> Step {
        match self {
            Self::SoftwareVersion { want_model } => {
                let labels = DeviceInfoLabels {
                    software_version: label_of(&status, payload),
                    device_model: String::new(),
                };
                if want_model {
                    Step::next(
                        RdmCommand::GetDeviceModelDescription,
                        SectionOp::DeviceInfo(Self::Model { labels }),
                    )
                } else {
                    Self::descriptor(labels)
                }
            }
            Self::Model { mut labels } => {
                labels.device_model = label_of(&status, payload);
                Self::descriptor(labels)
            }
            Self::Descriptor { labels } => Step::section(status, || match payload {
                RdmPayload::DeviceInfo(device) => Some(render(&labels, &device)),
                _ => None,
            }),
        }
    }

    fn descriptor(labels: DeviceInfoLabels) -> Step {
        Step::next(
            RdmCommand::GetDeviceInfo,
            SectionOp::DeviceInfo(Self::Descriptor { labels }),
        )
    }
}

fn label_of(status: &ClassifiedStatus, payload: RdmPayload) -> String {
    match (status.is_success(), payload) {
        (true, RdmPayload::Label(label)) => label,
        _ => String::new(),
    }
}

pub(crate) fn render(labels: &DeviceInfoLabels, device: &DeviceDescriptor) -> SectionData {
    SectionData::new(vec![
        AttributeItem::text(
            "Protocol Version",
            format!(
                "{}.{}",
                device.protocol_version_high, device.protocol_version_low
            ),
        ),
        AttributeItem::text(
            "Device Model",
            compose(&labels.device_model, device.device_model),
        ),
        AttributeItem::text(
            "Product Category",
            text::product_category(device.product_category),
        ),
        AttributeItem::text(
            "Software Version",
            compose(&labels.software_version, device.software_version),
        ),
        AttributeItem::uint("DMX Footprint", device.dmx_footprint),
        AttributeItem::text(
            "Personality",
            format!(
                "{} of {}",
                device.current_personality, device.personality_count
            ),
        ),
        AttributeItem::uint("Sub Devices", device.sub_device_count),
        AttributeItem::uint("Sensors", device.sensor_count),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reply::Outcome;

    fn expect_next(step: Step) -> (RdmCommand, SectionOp) {
        match step {
            Step::Pending { command, op } => (command, op),
            other => panic!("expected another transaction, got {other:?}"),
        }
    }

    fn device() -> DeviceDescriptor {
        DeviceDescriptor {
            protocol_version_high: 1,
            protocol_version_low: 0,
            device_model: 200,
            product_category: 0x0101,
            software_version: 7,
            dmx_footprint: 4,
            current_personality: 1,
            personality_count: 3,
            sensor_count: 2,
            ..DeviceDescriptor::default()
        }
    }

    #[test]
    fn model_hint_adds_a_step_and_composes_labels() {
        let (command, op) = DeviceInfoOp::begin(true);
        assert_eq!(command, RdmCommand::GetSoftwareVersionLabel);

        let (command, op) = expect_next(op.advance(
            ClassifiedStatus::Valid,
            RdmPayload::Label("1.2.0".into()),
        ));
        assert_eq!(command, RdmCommand::GetDeviceModelDescription);

        let (command, op) = expect_next(op.advance(
            ClassifiedStatus::Valid,
            RdmPayload::Label("Acme".into()),
        ));
        assert_eq!(command, RdmCommand::GetDeviceInfo);

        let Step::Done(Outcome::Section(data)) =
            op.advance(ClassifiedStatus::Valid, RdmPayload::DeviceInfo(device()))
        else {
            panic!("expected section data");
        };
        assert_eq!(data.item("Device Model").unwrap().value.display(), "Acme (200)");
        assert_eq!(data.item("Software Version").unwrap().value.display(), "1.2.0 (7)");
        assert_eq!(data.item("Personality").unwrap().value.display(), "1 of 3");
        assert_eq!(data.item("Protocol Version").unwrap().value.display(), "1.0");
    }

    #[test]
    fn failed_label_reads_do_not_abort() {
        let (_, op) = DeviceInfoOp::begin(false);
        let (command, op) = expect_next(op.advance(
            ClassifiedStatus::Nacked(0),
            RdmPayload::Empty,
        ));
        assert_eq!(command, RdmCommand::GetDeviceInfo);

        let Step::Done(Outcome::Section(data)) =
            op.advance(ClassifiedStatus::Valid, RdmPayload::DeviceInfo(device()))
        else {
            panic!("expected section data");
        };
        assert_eq!(data.item("Device Model").unwrap().value.display(), "200");
        assert_eq!(data.item("Software Version").unwrap().value.display(), "7");
    }

    #[test]
    fn descriptor_failure_discards_accumulated_labels() {
        let op = SectionOp::DeviceInfo(DeviceInfoOp::Descriptor {
            labels: DeviceInfoLabels {
                software_version: "1.2.0".into(),
                device_model: "Acme".into(),
            },
        });
        let step = op.advance(
            ClassifiedStatus::TransportError("response timed out".into()),
            RdmPayload::Empty,
        );
        let Step::Failed(err) = step else {
            panic!("expected failure");
        };
        assert_eq!(err.to_string(), "protocol command error: response timed out");
    }
}
