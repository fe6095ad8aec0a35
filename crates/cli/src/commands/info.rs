use anyhow::{Context, Result};
use weave_core::catalog::EmptyCatalog;
use weave_core::codec::Codec;
use weave_core::model::{BlockKind, Direction};

use crate::read_code_input;

/// Summarize a wire string: name, block counts, footprint, nesting depth.
pub fn info_command(code: Option<String>, input: Option<String>) -> Result<()> {
    let code = read_code_input(code, input)?;

    let codec = Codec::new(&EmptyCatalog);
    let template = codec.decode(&code).context("Failed to decode template")?;

    let mut depth = 0u32;
    let mut max_depth = 0u32;
    let mut scopes = 0usize;
    for block in &template.blocks {
        if let Some(bracket) = &block.bracket {
            match bracket.direction {
                Direction::Open => {
                    depth += 1;
                    max_depth = max_depth.max(depth);
                }
                Direction::Close => depth = depth.saturating_sub(1),
            }
        }
        if block.kind.is_scope_head() || block.kind == BlockKind::Else {
            scopes += 1;
        }
    }

    println!("Template Info");
    println!("=============");
    println!("Name: {}", template.name());
    println!("Blocks: {}", template.blocks.len());
    println!("Footprint: {}", template.footprint());
    println!("Scopes: {scopes}");
    println!("Max nesting depth: {max_depth}");

    Ok(())
}
