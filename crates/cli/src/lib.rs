use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};
use weave_core::catalog::{Catalog, EmptyCatalog, JsonCatalog};
use weave_core::model::CodeBlock;

pub mod commands;

/// Initialize logging with a default filter.
///
/// Use the `RUST_LOG` environment variable to override the default filter.
/// Warnings from the core (unknown actions, invalid tags, truncation) are
/// shown by default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(false).init();
}

/// Resolve the wire string to operate on: an inline `--code` value wins,
/// otherwise the contents of `--input <file>`.
pub fn read_code_input(code: Option<String>, input: Option<String>) -> Result<String> {
    if let Some(code) = code {
        return Ok(code.trim().to_string());
    }
    if let Some(path) = input {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read wire string from {path}"))?;
        return Ok(contents.trim().to_string());
    }
    Err(anyhow!("Provide a template code with --code or --input"))
}

/// Load the catalog data file if one was given; fall back to an empty catalog
/// (tag defaults unavailable, encode warns per block).
pub fn load_catalog(path: Option<&Path>) -> Result<Box<dyn Catalog>> {
    match path {
        Some(path) => {
            let catalog = JsonCatalog::from_path(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(EmptyCatalog)),
    }
}

/// One-line human-readable rendering of a block for listings.
pub fn describe_block(block: &CodeBlock) -> String {
    if let Some(bracket) = &block.bracket {
        return format!("bracket {} ({})", bracket.direction.wire_name(), bracket.scope.wire_name());
    }
    if block.action.is_empty() {
        return block.kind.wire_name().to_string();
    }
    format!("{} {}", block.kind.wire_name(), block.action)
}
