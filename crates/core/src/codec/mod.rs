//! Lossless two-way transform between templates and their wire form.
//!
//! The wire form is the compact JSON serialization of the document types in
//! [`wire`], gzip-compressed and base64-encoded into an opaque string. Tag
//! defaults are resolved against the [`Catalog`] collaborator at encode time;
//! decode reads any tag-option markers back into the sparse `tags` map so a
//! round trip reproduces the caller's tag choices without a catalog hit.

mod decode;
mod encode;
pub mod wire;

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::model::{Template, TemplateError};
use wire::WireTemplate;

/// Capacity of a block's item container. Argument and tag items must fit in
/// it together; arguments are truncated from the end when they don't.
pub const SLOT_CAPACITY: usize = 27;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to compress payload: {0}")]
    Compress(std::io::Error),
    #[error("failed to decompress payload: {0}")]
    Decompress(std::io::Error),
    #[error("malformed wire document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("block {index} is missing its `{field}` field")]
    MissingField { index: usize, field: &'static str },
    #[error("block {index} names unknown kind `{name}`")]
    UnknownKind { index: usize, name: String },
    #[error("block {index} has malformed bracket fields")]
    BadBracket { index: usize },
    #[error("block {index} names unknown target `{name}`")]
    UnknownTarget { index: usize, name: String },
    #[error("block {index} references unknown variable scope `{name}`")]
    UnknownScope { index: usize, name: String },
    #[error("block {index} declares unknown parameter type `{name}`")]
    UnknownParamType { index: usize, name: String },
    #[error("block {index} carries an item that cannot appear in this position")]
    UnsupportedItem { index: usize },
}

/// Encoder/decoder bound to a catalog.
pub struct Codec<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> Codec<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    /// Serialize a template to its opaque wire string.
    pub fn encode(&self, template: &Template) -> Result<String, CodecError> {
        let document = self.encode_document(template)?;
        let json = serde_json::to_string(&document)?;
        pack(&json)
    }

    /// Reconstruct a template from its opaque wire string.
    pub fn decode(&self, code: &str) -> Result<Template, CodecError> {
        let json = unpack(code)?;
        let document: WireTemplate = serde_json::from_str(&json)?;
        self.decode_document(&document)
    }

    /// Build the wire document without packing it. Useful for tooling that
    /// wants to inspect or pretty-print the JSON form.
    pub fn encode_document(&self, template: &Template) -> Result<WireTemplate, CodecError> {
        encode::encode_template(self.catalog, template)
    }

    /// Reconstruct a template from an unpacked wire document.
    pub fn decode_document(&self, document: &WireTemplate) -> Result<Template, CodecError> {
        decode::decode_template(document)
    }
}

/// gzip + base64 an already-serialized wire document.
pub fn pack(json: &str) -> Result<String, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json.as_bytes()).map_err(CodecError::Compress)?;
    let compressed = encoder.finish().map_err(CodecError::Compress)?;
    Ok(BASE64.encode(compressed))
}

/// Inverse of [`pack`].
pub fn unpack(code: &str) -> Result<String, CodecError> {
    let compressed = BASE64.decode(code.trim())?;
    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut json = String::new();
    decoder.read_to_string(&mut json).map_err(CodecError::Decompress)?;
    Ok(json)
}
