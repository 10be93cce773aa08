//! Section reads.

use tabled::Tabled;

use rdmgate_api::SimulatedBus;
use rdmgate_core::{AttributeItem, Gateway, ItemValue, SectionData};

use crate::cli::GetArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Attribute")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Field")]
    field: String,
}

impl From<&AttributeItem> for ItemRow {
    fn from(item: &AttributeItem) -> Self {
        Self {
            label: item.label.clone(),
            value: item.value.display(),
            field: field_hint(item),
        }
    }
}

/// Field name plus whatever constrains its value.
fn field_hint(item: &AttributeItem) -> String {
    let Some(field) = item.field.as_deref() else {
        return String::new();
    };
    match &item.value {
        ItemValue::UInt {
            min: Some(min),
            max: Some(max),
            ..
        } => format!("{field} ({min}..={max})"),
        ItemValue::Select { options, .. } if !options.is_empty() => {
            format!("{field} [{}]", options.join(", "))
        }
        _ => field.to_owned(),
    }
}

fn visible(data: &SectionData) -> impl Iterator<Item = &AttributeItem> {
    data.items
        .iter()
        .filter(|i| !matches!(i.value, ItemValue::Hidden(_)))
}

fn detail(data: &SectionData) -> String {
    let rows: Vec<ItemRow> = visible(data).map(ItemRow::from).collect();
    let mut out = if rows.is_empty() {
        "(no data)".to_owned()
    } else {
        output::render_table(&rows)
    };
    if let Some(button) = &data.save_button {
        out = format!("{out}\nAction: {button}");
    }
    out
}

fn plain(data: &SectionData) -> String {
    visible(data)
        .map(|i| format!("{}: {}", i.label, i.value.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    args: &GetArgs,
    gateway: &mut Gateway<SimulatedBus>,
    ctx: &Context,
) -> Result<(), CliError> {
    let (universe, uid) = (args.device.universe, args.device.uid);
    util::require_device(gateway, universe, uid)?;
    let data = util::run_request(gateway, universe, |gw| {
        gw.get_section(universe, uid, &args.section, &args.hint)
    })?;

    let out = output::render_single(ctx.format, &data, detail, plain)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_hint_shows_ranges_and_options() {
        let address = AttributeItem {
            label: "DMX Start Address".into(),
            value: ItemValue::UInt {
                value: 1,
                min: Some(1),
                max: Some(512),
            },
            field: Some("address".into()),
        };
        assert_eq!(field_hint(&address), "address (1..=512)");

        let language = AttributeItem {
            label: "Language".into(),
            value: ItemValue::Select {
                options: vec!["en".into(), "de".into()],
                selected: Some(0),
            },
            field: Some("language".into()),
        };
        assert_eq!(field_hint(&language), "language [en, de]");

        assert_eq!(field_hint(&AttributeItem::text("Model", "x")), "");
    }

    #[test]
    fn plain_skips_hidden_items() {
        let mut data = SectionData::new(vec![
            AttributeItem::text("Present Value", "42 C"),
            AttributeItem {
                label: "record".into(),
                value: ItemValue::Hidden("0".into()),
                field: Some("record".into()),
            },
        ]);
        data.save_button = Some("Record Sensor".into());

        assert_eq!(plain(&data), "Present Value: 42 C");
        assert!(detail(&data).ends_with("Action: Record Sensor"));
    }
}
