//! Read-only action catalog interface.
//!
//! The catalog is an externally supplied, versioned registry of legal action
//! names, their tag schemas, and argument type signatures. The codec consults
//! it for tag defaults and validation; nothing in this crate embeds catalog
//! data as compiled constants, so the action set can change without a rebuild.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::BlockKind;

/// One tag in an action's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpec {
    pub name: String,
    pub options: Vec<String>,
    pub default: String,
    /// Fixed container slot the platform assigns this tag.
    #[serde(default = "default_tag_slot")]
    pub slot: u32,
}

fn default_tag_slot() -> u32 {
    26
}

/// Everything the catalog knows about one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpec {
    #[serde(default)]
    pub tags: Vec<TagSpec>,
    /// Declared argument type names, in slot order.
    #[serde(default)]
    pub arg_types: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
}

/// Read-only lookup interface the codec depends on.
pub trait Catalog {
    /// Resolve an action within a kind's namespace. A miss is a validation
    /// warning for callers, never a hard failure.
    fn lookup(&self, kind: BlockKind, action: &str) -> Option<&ActionSpec>;
}

/// A catalog with no entries. Encoding against it emits warnings and no tag
/// items; useful for tests and for working without a data file.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyCatalog;

impl Catalog for EmptyCatalog {
    fn lookup(&self, _kind: BlockKind, _action: &str) -> Option<&ActionSpec> {
        None
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog loaded from a versioned JSON data file.
///
/// Actions are keyed `"<kind>/<action>"`, e.g. `"set_var/+"`. Dynamic blocks
/// (function/process definitions and calls) share a single entry under the
/// `dynamic` action name, e.g. `"func/dynamic"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonCatalog {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    actions: HashMap<String, ActionSpec>,
}

impl JsonCatalog {
    pub fn from_str(data: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path)?;
        Self::from_str(&data)
    }

    /// Register an action spec. Mostly useful for building fixtures.
    pub fn insert(&mut self, kind: BlockKind, action: impl Into<String>, spec: ActionSpec) {
        self.actions.insert(format!("{}/{}", kind.wire_name(), action.into()), spec);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Catalog for JsonCatalog {
    fn lookup(&self, kind: BlockKind, action: &str) -> Option<&ActionSpec> {
        self.actions.get(&format!("{}/{action}", kind.wire_name()))
    }
}
