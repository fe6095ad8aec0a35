//! Wire document → template.

use std::collections::BTreeMap;

use crate::codec::wire::{WireBlock, WireItem, WireParameter, WireSlot, WireTemplate};
use crate::codec::CodecError;
use crate::model::{
    ArgValue, Argument, BlockKind, CodeBlock, Direction, Number, ParamType, Parameter, ScopeKind,
    Target, Template, VarScope,
};

pub(super) fn decode_template(document: &WireTemplate) -> Result<Template, CodecError> {
    let mut blocks = Vec::with_capacity(document.blocks.len());
    for (index, wire) in document.blocks.iter().enumerate() {
        blocks.push(decode_block(wire, index)?);
    }
    Ok(Template::new(blocks)?)
}

fn decode_block(wire: &WireBlock, index: usize) -> Result<CodeBlock, CodecError> {
    // Brackets have no `block` name; they are discriminated by direct + type.
    if wire.id == "bracket" || (wire.direct.is_some() && wire.scope_type.is_some()) {
        let direction = wire
            .direct
            .as_deref()
            .and_then(Direction::from_wire_name)
            .ok_or(CodecError::BadBracket { index })?;
        let scope = wire
            .scope_type
            .as_deref()
            .and_then(ScopeKind::from_wire_name)
            .ok_or(CodecError::BadBracket { index })?;
        return Ok(CodeBlock::bracket(direction, scope));
    }

    let kind_name =
        wire.block.as_deref().ok_or(CodecError::MissingField { index, field: "block" })?;
    let kind = BlockKind::from_wire_name(kind_name)
        .ok_or_else(|| CodecError::UnknownKind { index, name: kind_name.to_string() })?;

    if kind == BlockKind::Else {
        return Ok(CodeBlock::else_head());
    }

    let (args, tags) = decode_items(wire, index)?;

    let action = if kind.is_dynamic() {
        wire.data.clone().ok_or(CodecError::MissingField { index, field: "data" })?
    } else {
        wire.action.clone().ok_or(CodecError::MissingField { index, field: "action" })?
    };

    let target = match wire.target.as_deref() {
        Some(name) => Target::from_wire_name(name)
            .ok_or_else(|| CodecError::UnknownTarget { index, name: name.to_string() })?,
        None => Target::default(),
    };

    let mut block = CodeBlock {
        kind,
        action,
        args,
        target,
        tags,
        inverted: false,
        sub_action: wire.sub_action.clone(),
        ls_cancel: false,
        bracket: None,
    };
    match wire.attribute.as_deref() {
        Some("NOT") => block.inverted = true,
        Some("LS-CANCEL") => block.ls_cancel = true,
        _ => {}
    }
    Ok(block)
}

/// Rebuild the argument list and the sparse tag map from the item container.
///
/// Tag-option markers are consumed into the tag map rather than kept as
/// arguments, hint items are skipped, and a missing `args` field (older
/// payloads) yields an empty list. Slots are kept only where they differ from
/// the item's position, so builder-made templates round-trip unchanged.
fn decode_items(
    wire: &WireBlock,
    index: usize,
) -> Result<(Vec<Argument>, BTreeMap<String, String>), CodecError> {
    let mut args = Vec::new();
    let mut tags = BTreeMap::new();

    let items: &[WireSlot] = match &wire.args {
        Some(container) => &container.items,
        None => return Ok((args, tags)),
    };

    for entry in items {
        match &entry.item {
            WireItem::Tag(tag) => {
                tags.insert(tag.tag.clone(), tag.option.clone());
            }
            WireItem::Hint(_) => {}
            item => {
                let value = decode_value(item, index)?;
                let position = args.len() as u32;
                let slot = entry.slot.filter(|&s| s != position);
                args.push(Argument { slot, value });
            }
        }
    }

    Ok((args, tags))
}

fn decode_value(item: &WireItem, index: usize) -> Result<ArgValue, CodecError> {
    Ok(match item {
        WireItem::Text { name } => ArgValue::Text(name.clone()),
        WireItem::StyledText { name } => ArgValue::StyledText(name.clone()),
        WireItem::Number { name } => ArgValue::Number(Number::parse(name)),
        WireItem::Location { loc, .. } => ArgValue::Location {
            x: loc.x,
            y: loc.y,
            z: loc.z,
            pitch: loc.pitch,
            yaw: loc.yaw,
        },
        WireItem::Variable { name, scope } => {
            let scope = VarScope::from_wire_name(scope)
                .ok_or_else(|| CodecError::UnknownScope { index, name: scope.clone() })?;
            ArgValue::Variable { name: name.clone(), scope }
        }
        WireItem::Sound { sound, pitch, vol } => {
            ArgValue::Sound { name: sound.clone(), pitch: *pitch, volume: *vol }
        }
        WireItem::Particle(payload) => ArgValue::Particle(payload.clone()),
        WireItem::Potion { pot, dur, amp } => {
            ArgValue::Potion { effect: pot.clone(), duration: *dur, amplifier: *amp }
        }
        WireItem::GameValue { value_type, target } => {
            ArgValue::GameValue { name: value_type.clone(), target: target.clone() }
        }
        WireItem::Vector { x, y, z } => ArgValue::Vector { x: *x, y: *y, z: *z },
        WireItem::Parameter(parameter) => ArgValue::Parameter(decode_parameter(parameter, index)?),
        WireItem::ItemStack { item } => ArgValue::ItemStack(item.clone()),
        WireItem::Tag(tag) => {
            ArgValue::TagMarker { tag: tag.tag.clone(), option: tag.option.clone() }
        }
        WireItem::Hint(_) => return Err(CodecError::UnsupportedItem { index }),
    })
}

fn decode_parameter(wire: &WireParameter, index: usize) -> Result<Parameter, CodecError> {
    let param_type = ParamType::from_wire_name(&wire.param_type)
        .ok_or_else(|| CodecError::UnknownParamType { index, name: wire.param_type.clone() })?;

    let default_value = match &wire.default_value {
        Some(item) => Some(Box::new(decode_value(item, index)?)),
        None => None,
    };

    Ok(Parameter {
        name: wire.name.clone(),
        param_type,
        plural: wire.plural,
        optional: wire.optional,
        description: wire.description.clone(),
        note: wire.note.clone(),
        default_value,
    })
}
