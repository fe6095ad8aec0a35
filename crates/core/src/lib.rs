//! weave-core
//!
//! Core library for building, packing, and slicing code templates for a
//! block-based visual scripting platform.
//!
//! This crate defines the codeblock/template IR (model), the catalog
//! interface, the wire codec, the template slicer, and the transport seam for
//! shipping built templates to a running client.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, editor integrations, etc.).

pub mod catalog;
pub mod codec;
pub mod model;
pub mod slicer;
pub mod transport;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
