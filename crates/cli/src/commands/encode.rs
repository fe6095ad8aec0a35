use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use weave_core::codec::wire::WireTemplate;
use weave_core::codec::Codec;

use crate::load_catalog;

/// Encode a wire-shaped JSON document (`{ "blocks": [...] }`) into an opaque
/// wire string. Tag defaults are resolved against the catalog when one is
/// provided.
pub fn encode_command(input: String, catalog_path: Option<String>) -> Result<()> {
    let json = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read template document from {input}"))?;
    let document: WireTemplate =
        serde_json::from_str(&json).context("Failed to parse template document JSON")?;

    let catalog = load_catalog(catalog_path.as_deref().map(Path::new))?;
    let codec = Codec::new(catalog.as_ref());

    let template = codec.decode_document(&document).context("Template document is malformed")?;
    let code = codec.encode(&template).context("Failed to encode template")?;
    println!("{code}");

    Ok(())
}
