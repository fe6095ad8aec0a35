//! Serde types mirroring the wire document exactly.
//!
//! The externally visible form is the compact JSON serialization of
//! [`WireTemplate`], gzip-compressed and base64-encoded. Optional fields are
//! omitted when absent so decoding stays tolerant of older payloads that
//! carry no `args` or attribute fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level wire document: `{ "blocks": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTemplate {
    pub blocks: Vec<WireBlock>,
}

/// One block document.
///
/// `id` is `"block"` for every kind except brackets, which use `"bracket"`
/// and are discriminated by `direct` + `type` instead of a `block` name.
/// Dynamic blocks carry their user-chosen name in `data`; everything else
/// names its operation in `action`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireBlock {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(rename = "subAction", default, skip_serializing_if = "Option::is_none")]
    pub sub_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<WireArgs>,
}

/// The slot-indexed item container of a block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireArgs {
    pub items: Vec<WireSlot>,
}

/// One occupied slot in the item container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSlot {
    pub item: WireItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,
}

/// An item payload, discriminated by its `id` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id", content = "data")]
pub enum WireItem {
    #[serde(rename = "txt")]
    Text { name: String },
    #[serde(rename = "comp")]
    StyledText { name: String },
    #[serde(rename = "num")]
    Number { name: String },
    #[serde(rename = "loc")]
    Location {
        #[serde(rename = "isBlock", default)]
        is_block: bool,
        loc: WireLocation,
    },
    #[serde(rename = "var")]
    Variable { name: String, scope: String },
    #[serde(rename = "snd")]
    Sound { sound: String, pitch: f64, vol: f64 },
    #[serde(rename = "part")]
    Particle(Value),
    #[serde(rename = "pot")]
    Potion { pot: String, dur: i64, amp: i64 },
    #[serde(rename = "g_val")]
    GameValue {
        #[serde(rename = "type")]
        value_type: String,
        target: String,
    },
    #[serde(rename = "vec")]
    Vector { x: f64, y: f64, z: f64 },
    #[serde(rename = "pn_el")]
    Parameter(WireParameter),
    #[serde(rename = "item")]
    ItemStack { item: Value },
    #[serde(rename = "bl_tag")]
    Tag(WireTag),
    #[serde(rename = "hint")]
    Hint(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireLocation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// Formal-parameter payload of a definition header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub plural: bool,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "default_value", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Box<WireItem>>,
}

/// Tag-option marker payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTag {
    pub option: String,
    pub tag: String,
    pub action: String,
    pub block: String,
}
