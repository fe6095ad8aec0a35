//! Template → wire document.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::catalog::{ActionSpec, Catalog, TagSpec};
use crate::codec::wire::{
    WireArgs, WireBlock, WireItem, WireLocation, WireParameter, WireSlot, WireTag, WireTemplate,
};
use crate::codec::{CodecError, SLOT_CAPACITY};
use crate::model::{ArgValue, BlockKind, CodeBlock, Parameter, Target, Template};

pub(super) fn encode_template(
    catalog: &dyn Catalog,
    template: &Template,
) -> Result<WireTemplate, CodecError> {
    let blocks = template.blocks.iter().map(|block| encode_block(catalog, block)).collect();
    Ok(WireTemplate { blocks })
}

fn encode_block(catalog: &dyn Catalog, block: &CodeBlock) -> WireBlock {
    if let Some(bracket) = &block.bracket {
        return WireBlock {
            id: "bracket".to_string(),
            direct: Some(bracket.direction.wire_name().to_string()),
            scope_type: Some(bracket.scope.wire_name().to_string()),
            args: Some(WireArgs::default()),
            ..WireBlock::default()
        };
    }

    let mut wire = WireBlock { id: "block".to_string(), ..WireBlock::default() };
    wire.block = Some(block.kind.wire_name().to_string());

    match block.kind {
        BlockKind::Else => {}
        kind if kind.is_dynamic() => wire.data = Some(block.action.clone()),
        _ => wire.action = Some(block.action.clone()),
    }

    if block.inverted {
        wire.attribute = Some("NOT".to_string());
    } else if block.ls_cancel {
        wire.attribute = Some("LS-CANCEL".to_string());
    }
    wire.sub_action = block.sub_action.clone();

    // 'Selection' is what the platform assumes when the field is blank.
    if block.kind.is_target_bearing() && block.target != Target::Selection {
        wire.target = Some(block.target.wire_name().to_string());
    }

    wire.args = Some(WireArgs { items: encode_items(catalog, block) });
    wire
}

/// Format the argument items, resolve tag items against the catalog, and
/// enforce the container capacity.
fn encode_items(catalog: &dyn Catalog, block: &CodeBlock) -> Vec<WireSlot> {
    let mut items: Vec<WireSlot> = Vec::with_capacity(block.args.len());
    let mut marked_options: BTreeMap<&str, &str> = BTreeMap::new();

    for (position, arg) in block.args.iter().enumerate() {
        if let ArgValue::TagMarker { tag, option } = &arg.value {
            marked_options.insert(tag.as_str(), option.as_str());
            continue;
        }
        let slot = arg.slot.unwrap_or(position as u32);
        items.push(WireSlot { item: encode_value(&arg.value, block), slot: Some(slot) });
    }

    if !block.kind.has_catalog_entry() {
        return items;
    }

    let action = block.catalog_action();
    let spec = match catalog.lookup(block.kind, action) {
        Some(spec) => spec,
        None => {
            warn!("unknown action `{action}` for `{}`; encoding without tags", block.kind);
            return items;
        }
    };
    if spec.deprecated {
        warn!("action `{action}` for `{}` is deprecated", block.kind);
    }

    let chosen = validate_tags(spec, &block.tags, action);
    let tag_items: Vec<WireSlot> = spec
        .tags
        .iter()
        .map(|tag| {
            let option = marked_options
                .get(tag.name.as_str())
                .copied()
                .or_else(|| chosen.get(tag.name.as_str()).copied())
                .unwrap_or(&tag.default);
            make_tag_item(tag, option, action, block.kind)
        })
        .collect();

    // The container holds 27 items; tag items are never dropped, so argument
    // items give way from the end.
    if items.len() + tag_items.len() > SLOT_CAPACITY {
        let keep = SLOT_CAPACITY.saturating_sub(tag_items.len());
        debug!(
            "action `{action}`: dropped {} argument item(s) to fit {} tag(s)",
            items.len() - keep,
            tag_items.len()
        );
        items.truncate(keep);
    }
    items.extend(tag_items);
    items
}

/// Check caller-chosen tags against the schema; invalid names and options are
/// warned about and dropped so they fall through to the default.
fn validate_tags<'a>(
    spec: &ActionSpec,
    applied: &'a BTreeMap<String, String>,
    action: &str,
) -> BTreeMap<&'a str, &'a str> {
    if !applied.is_empty() && spec.tags.is_empty() {
        warn!("action `{action}` has no tags, but {} were supplied", applied.len());
        return BTreeMap::new();
    }

    let mut valid = BTreeMap::new();
    for (name, option) in applied {
        let Some(tag) = spec.tags.iter().find(|t| &t.name == name) else {
            warn!("tag `{name}` does not exist for action `{action}`");
            continue;
        };
        if !tag.options.iter().any(|o| o == option) {
            warn!(
                "tag `{name}` has no option `{option}`; falling back to default `{}`",
                tag.default
            );
            continue;
        }
        valid.insert(name.as_str(), option.as_str());
    }
    valid
}

fn make_tag_item(tag: &TagSpec, option: &str, action: &str, kind: BlockKind) -> WireSlot {
    WireSlot {
        item: WireItem::Tag(WireTag {
            option: option.to_string(),
            tag: tag.name.clone(),
            action: action.to_string(),
            block: kind.wire_name().to_string(),
        }),
        slot: Some(tag.slot),
    }
}

fn encode_value(value: &ArgValue, block: &CodeBlock) -> WireItem {
    match value {
        ArgValue::Text(text) => WireItem::Text { name: text.clone() },
        ArgValue::StyledText(text) => WireItem::StyledText { name: text.clone() },
        ArgValue::Number(number) => WireItem::Number { name: number.wire_text() },
        ArgValue::ItemStack(payload) => WireItem::ItemStack { item: payload.clone() },
        ArgValue::Location { x, y, z, pitch, yaw } => WireItem::Location {
            is_block: false,
            loc: WireLocation { x: *x, y: *y, z: *z, pitch: *pitch, yaw: *yaw },
        },
        ArgValue::Variable { name, scope } => {
            WireItem::Variable { name: name.clone(), scope: scope.wire_name().to_string() }
        }
        ArgValue::Sound { name, pitch, volume } => {
            WireItem::Sound { sound: name.clone(), pitch: *pitch, vol: *volume }
        }
        ArgValue::Potion { effect, duration, amplifier } => {
            WireItem::Potion { pot: effect.clone(), dur: *duration, amp: *amplifier }
        }
        ArgValue::Particle(payload) => WireItem::Particle(payload.clone()),
        ArgValue::Vector { x, y, z } => WireItem::Vector { x: *x, y: *y, z: *z },
        ArgValue::GameValue { name, target } => {
            WireItem::GameValue { value_type: name.clone(), target: target.clone() }
        }
        ArgValue::Parameter(parameter) => WireItem::Parameter(encode_parameter(parameter, block)),
        ArgValue::TagMarker { tag, option } => WireItem::Tag(WireTag {
            option: option.clone(),
            tag: tag.clone(),
            action: block.catalog_action().to_string(),
            block: block.kind.wire_name().to_string(),
        }),
    }
}

fn encode_parameter(parameter: &Parameter, block: &CodeBlock) -> WireParameter {
    let default_value = match &parameter.default_value {
        Some(_) if !parameter.optional => {
            warn!(
                "parameter `{}`: default value requires the parameter to be optional; dropped",
                parameter.name
            );
            None
        }
        Some(_) if parameter.plural => {
            warn!(
                "parameter `{}`: plural parameters cannot carry a default value; dropped",
                parameter.name
            );
            None
        }
        Some(value) => Some(Box::new(encode_value(value, block))),
        None => None,
    };

    WireParameter {
        name: parameter.name.clone(),
        param_type: parameter.param_type.wire_name().to_string(),
        plural: parameter.plural,
        optional: parameter.optional,
        description: parameter.description.clone(),
        note: parameter.note.clone(),
        default_value,
    }
}
