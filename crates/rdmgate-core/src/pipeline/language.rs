// LANGUAGE_CAPABILITIES, then LANGUAGE. Neither failure aborts: the select
// simply ends up with fewer options or no selection.

use rdmgate_api::{RdmCommand, RdmPayload};

use super::{LANGUAGE_FIELD, SectionOp, Step};
use crate::classify::ClassifiedStatus;
use crate::model::{AttributeItem, ItemValue, SectionData};
use crate::reply::Outcome;

#[derive(Debug)]
pub(crate) enum LanguageOp {
    Capabilities,
    Current { languages: Vec<String> },
}

impl LanguageOp {
    pub(crate) fn begin() -> (RdmCommand, SectionOp) {
        (
            RdmCommand::GetLanguageCapabilities,
            SectionOp::Language(Self::Capabilities),
        )
    }

    pub(crate) fn advance(self, status: &ClassifiedStatus, payload: RdmPayload) -> Step {
        match (self, status.is_success(), payload) {
            (Self::Capabilities, ok, payload) => {
                let languages = match (ok, payload) {
                    (true, RdmPayload::LanguageList(languages)) => languages,
                    _ => Vec::new(),
                };
                Step::next(
                    RdmCommand::GetLanguage,
                    SectionOp::Language(Self::Current { languages }),
                )
            }
            (Self::Current { languages }, true, RdmPayload::Label(current)) => {
                Step::Done(Outcome::Section(render(languages, Some(current))))
            }
            (Self::Current { languages }, _, _) => {
                Step::Done(Outcome::Section(render(languages, None)))
            }
        }
    }
}

fn render(mut options: Vec<String>, current: Option<String>) -> SectionData {
    let selected = match current {
        Some(current) if options.is_empty() => {
            options.push(current);
            Some(0)
        }
        Some(current) => options.iter().position(|l| *l == current),
        None => None,
    };
    SectionData::new(vec![AttributeItem {
        label: "Language".into(),
        value: ItemValue::Select { options, selected },
        field: Some(LANGUAGE_FIELD.into()),
    }])
}
