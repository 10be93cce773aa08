// ── Sensor read ──
//
// SENSOR_DEFINITION, then SENSOR_VALUE for the same index. A failed
// definition is carried forward as `None`; only the value read can fail
// the section.

use rdmgate_api::{RdmCommand, RdmPayload, SensorDescriptor, SensorReading, text};
use tracing::debug;

use super::{RECORD_SENSOR_FIELD, SectionOp, Step};
use crate::classify::ClassifiedStatus;
use crate::model::{AttributeItem, ItemValue, SectionData};

pub(crate) const RECORD_BUTTON: &str = "Record Sensor";

#[derive(Debug)]
pub(crate) enum SensorOp {
    Definition { sensor: u8 },
    Value {
        sensor: u8,
        definition: Option<SensorDescriptor>,
    },
}

impl SensorOp {
    pub(crate) fn begin(sensor: u8) -> (RdmCommand, SectionOp) {
        (
            RdmCommand::GetSensorDefinition { sensor },
            SectionOp::Sensor(Self::Definition { sensor }),
        )
    }

    pub(crate) fn advance(self, status: ClassifiedStatus, payload: RdmPayload) -> Step {
        match self {
            Self::Definition { sensor } => {
                let definition = match (status.is_success(), payload) {
                    (true, RdmPayload::SensorDefinition(definition)) => Some(definition),
                    _ => None,
                };
                Step::next(
                    RdmCommand::GetSensorValue { sensor },
                    SectionOp::Sensor(Self::Value { sensor, definition }),
                )
            }
            Self::Value { sensor, definition } => {
                let step = Step::section(status, || match payload {
                    RdmPayload::SensorValue(reading) => {
                        Some(render(definition.as_ref(), &reading))
                    }
                    _ => None,
                });
                if let Step::Failed(err) = &step {
                    debug!(sensor, error = %err, "sensor value read failed");
                }
                step
            }
        }
    }
}

pub(crate) fn render(definition: Option<&SensorDescriptor>, reading: &SensorReading) -> SectionData {
    let units = definition
        .map(|d| text::scaled_unit(d.prefix, d.unit))
        .unwrap_or_default();
    let with_units = |value: String| {
        if units.is_empty() {
            value
        } else {
            format!("{value} {units}")
        }
    };

    let mut items = Vec::new();
    if let Some(def) = definition {
        items.push(AttributeItem::text("Description", def.description.clone()));
        items.push(AttributeItem::text("Type", text::sensor_type(def.sensor_type)));
        items.push(AttributeItem::text(
            "Range",
            with_units(format!("{} - {}", def.range_min, def.range_max)),
        ));
        items.push(AttributeItem::text(
            "Normal Range",
            with_units(format!("{} - {}", def.normal_min, def.normal_max)),
        ));
        if def.supports_recorded_value() {
            items.push(AttributeItem::text(
                "Recorded Value",
                with_units(reading.recorded.to_string()),
            ));
        }
        if def.supports_recorded_range() {
            items.push(AttributeItem::text(
                "Min / Max Recorded Values",
                with_units(format!("{} - {}", reading.lowest, reading.highest)),
            ));
        }
    }

    let present = with_units(reading.present_value.to_string());
    items.push(AttributeItem::text("Present Value", present.clone()));
    if definition.is_some_and(SensorDescriptor::supports_recorded_value) {
        items.push(AttributeItem {
            label: RECORD_SENSOR_FIELD.into(),
            value: ItemValue::Hidden(present),
            field: Some(RECORD_SENSOR_FIELD.into()),
        });
    }

    SectionData {
        items,
        save_button: Some(RECORD_BUTTON.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rdmgate_api::payload::{SENSOR_RECORDED_RANGE_VALUES, SENSOR_RECORDED_VALUE};

    use super::*;
    use crate::reply::Outcome;

    fn thermometer(support: u8) -> SensorDescriptor {
        SensorDescriptor {
            sensor_number: 0,
            sensor_type: 0x00,
            unit: 0x01,
            prefix: 0x00,
            range_min: -40,
            range_max: 120,
            normal_min: 10,
            normal_max: 80,
            recorded_value_support: support,
            description: "Lamp housing".into(),
        }
    }

    fn reading() -> SensorReading {
        SensorReading {
            sensor_number: 0,
            present_value: 42,
            lowest: 18,
            highest: 71,
            recorded: 40,
        }
    }

    fn labels(data: &SectionData) -> Vec<&str> {
        data.items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn full_support_renders_every_field() {
        let def = thermometer(SENSOR_RECORDED_VALUE | SENSOR_RECORDED_RANGE_VALUES);
        let data = render(Some(&def), &reading());

        assert_eq!(
            labels(&data),
            vec![
                "Description",
                "Type",
                "Range",
                "Normal Range",
                "Recorded Value",
                "Min / Max Recorded Values",
                "Present Value",
                "record",
            ]
        );
        assert_eq!(data.item("Range").unwrap().value.display(), "-40 - 120 C");
        assert_eq!(
            data.item("record").unwrap().value,
            ItemValue::Hidden("42 C".into())
        );
        assert_eq!(data.save_button.as_deref(), Some("Record Sensor"));
    }

    #[test]
    fn range_only_support_has_no_write_back_field() {
        let def = thermometer(SENSOR_RECORDED_RANGE_VALUES);
        let data = render(Some(&def), &reading());
        assert!(data.item("Recorded Value").is_none());
        assert!(data.item("Min / Max Recorded Values").is_some());
        assert!(data.item("record").is_none());
    }

    #[test]
    fn missing_definition_still_shows_present_value() {
        let data = render(None, &reading());
        assert_eq!(labels(&data), vec!["Present Value"]);
        assert_eq!(data.items[0].value.display(), "42");
    }

    #[test]
    fn failed_definition_carries_none_forward() {
        let (_, op) = SensorOp::begin(3);
        let step = op.advance(ClassifiedStatus::Nacked(6), RdmPayload::Empty);
        let Step::Pending { command, op } = step else {
            panic!("expected another transaction");
        };
        assert_eq!(command, RdmCommand::GetSensorValue { sensor: 3 });

        let step = op.advance(ClassifiedStatus::Valid, RdmPayload::SensorValue(reading()));
        let Step::Done(Outcome::Section(data)) = step else {
            panic!("expected section data");
        };
        assert_eq!(labels(&data), vec!["Present Value"]);
    }

    #[test]
    fn failed_value_fails_the_section() {
        let op = SectionOp::Sensor(SensorOp::Value {
            sensor: 0,
            definition: Some(thermometer(SENSOR_RECORDED_VALUE)),
        });
        let step = op.advance(ClassifiedStatus::Malformed("short".into()), RdmPayload::Empty);
        assert!(matches!(step, Step::Failed(_)));
    }
}
