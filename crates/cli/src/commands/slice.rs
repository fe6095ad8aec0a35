use std::path::Path;

use anyhow::{Context, Result};
use weave_core::codec::Codec;
use weave_core::slicer;

use crate::{load_catalog, read_code_input};

/// Decode a template, slice it to the given footprint budget, and re-encode
/// each resulting piece.
pub fn slice_command(
    code: Option<String>,
    input: Option<String>,
    budget: u32,
    catalog_path: Option<String>,
    json: bool,
) -> Result<()> {
    let code = read_code_input(code, input)?;
    let catalog = load_catalog(catalog_path.as_deref().map(Path::new))?;
    let codec = Codec::new(catalog.as_ref());

    let template = codec.decode(&code).context("Failed to decode template")?;
    let slices = slicer::slice(&template, budget).context("Failed to slice template")?;

    if json {
        let entries = slices
            .iter()
            .map(|t| {
                Ok(serde_json::json!({
                    "name": t.name(),
                    "footprint": t.footprint(),
                    "code": codec.encode(t)?,
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Sliced into {} template(s):", slices.len());
    for template in &slices {
        let piece_code = codec.encode(template).context("Failed to encode slice")?;
        println!();
        println!("  Name: {}", template.name());
        println!("  Footprint: {}", template.footprint());
        println!("  Code: {piece_code}");
    }

    Ok(())
}
