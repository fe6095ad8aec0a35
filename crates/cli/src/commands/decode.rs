use anyhow::{Context, Result};
use weave_core::catalog::EmptyCatalog;
use weave_core::codec::{unpack, Codec};

use crate::{describe_block, read_code_input};

/// Decode a wire string and list its blocks, or dump the raw wire document.
pub fn decode_command(code: Option<String>, input: Option<String>, json: bool) -> Result<()> {
    let code = read_code_input(code, input)?;

    if json {
        let raw = unpack(&code).context("Failed to unpack wire string")?;
        let value: serde_json::Value =
            serde_json::from_str(&raw).context("Failed to parse wire document JSON")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let codec = Codec::new(&EmptyCatalog);
    let template = codec.decode(&code).context("Failed to decode template")?;

    println!("Template: {}", template.name());
    println!("Blocks: {}", template.blocks.len());
    println!("Footprint: {}", template.footprint());
    for (index, block) in template.blocks.iter().enumerate() {
        println!("  [{index:>3}] {}", describe_block(block));
    }

    Ok(())
}
