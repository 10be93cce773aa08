// BOOT_SOFTWARE_VERSION_LABEL, then BOOT_SOFTWARE_VERSION_ID.

use rdmgate_api::{RdmCommand, RdmPayload};

use super::{SectionOp, Step, compose};
use crate::classify::ClassifiedStatus;
use crate::model::{AttributeItem, SectionData};
use crate::reply::Outcome;

#[derive(Debug)]
pub(crate) enum BootSoftwareOp {
    Label,
    Id { label: String },
}

impl BootSoftwareOp {
    pub(crate) fn begin() -> (RdmCommand, SectionOp) {
        (
            RdmCommand::GetBootSoftwareVersionLabel,
            SectionOp::BootSoftware(Self::Label),
        )
    }

    pub(crate) fn advance(self, status: &ClassifiedStatus, payload: RdmPayload) -> Step {
        match (self, status.is_success(), payload) {
            (Self::Label, true, RdmPayload::Label(label)) => Self::id(label),
            (Self::Label, _, _) => Self::id(String::new()),
            (Self::Id { label }, true, RdmPayload::BootVersion(id)) => {
                Step::Done(Outcome::Section(render(compose(&label, id))))
            }
            (Self::Id { label }, _, _) => Step::Done(Outcome::Section(render(label))),
        }
    }

    fn id(label: String) -> Step {
        Step::next(
            RdmCommand::GetBootSoftwareVersionId,
            SectionOp::BootSoftware(Self::Id { label }),
        )
    }
}

fn render(version: String) -> SectionData {
    SectionData::new(vec![AttributeItem::text("Boot Software", version)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(label: &str, status: ClassifiedStatus, payload: RdmPayload) -> String {
        let op = BootSoftwareOp::Id {
            label: label.into(),
        };
        match op.advance(&status, payload) {
            Step::Done(Outcome::Section(data)) => data.items[0].value.display(),
            other => panic!("expected section data, got {other:?}"),
        }
    }

    #[test]
    fn label_and_id_are_combined() {
        assert_eq!(
            version("boot-1.0", ClassifiedStatus::Valid, RdmPayload::BootVersion(42)),
            "boot-1.0 (42)"
        );
        assert_eq!(
            version("", ClassifiedStatus::Valid, RdmPayload::BootVersion(42)),
            "42"
        );
        assert_eq!(
            version("boot-1.0", ClassifiedStatus::Nacked(0), RdmPayload::Empty),
            "boot-1.0"
        );
    }
}
