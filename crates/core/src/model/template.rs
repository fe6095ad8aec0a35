//! The template value type, structural validation, and traversal helpers.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use thiserror::Error;

use crate::model::block::{BlockKind, CodeBlock, Direction};

/// Structural problems that make a block sequence unusable as a template.
///
/// All of these are fatal: a template that fails validation is never encoded
/// or sliced, and no partial output is produced.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template has no codeblocks")]
    Empty,
    #[error("template must start with an event, function, or process (found `{kind}`)")]
    BadStarter { kind: BlockKind },
    #[error("open bracket at block {index} has no matching close")]
    UnmatchedOpen { index: usize },
    #[error("close bracket at block {index} has no matching open")]
    UnmatchedClose { index: usize },
    #[error("else at block {index} does not follow the close of a conditional or repeat scope")]
    MisplacedElse { index: usize },
    #[error("scope head at block {index} is not followed by an open bracket")]
    MissingBrackets { index: usize },
    #[error("block {index}: argument slot {slot} conflicts with an earlier slot assignment")]
    SlotConflict { index: usize, slot: u32 },
}

/// An ordered, validated sequence of codeblocks forming one program unit.
///
/// Construction through [`Template::new`] is the only way to obtain one, so a
/// `Template` in hand always satisfies the structural invariants: non-empty,
/// starter-first, balanced brackets, legally placed `else` arms, and
/// conflict-free argument slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub blocks: Vec<CodeBlock>,
    pub author: String,
}

pub const DEFAULT_AUTHOR: &str = "codeweave";

impl Template {
    /// Validate `blocks` and wrap them as a template.
    pub fn new(blocks: Vec<CodeBlock>) -> Result<Self, TemplateError> {
        validate_blocks(&blocks)?;
        Ok(Self { blocks, author: DEFAULT_AUTHOR.to_string() })
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Display name derived from the starter block: the definition name for
    /// functions/processes, `<kind>_<action>` for events.
    pub fn name(&self) -> String {
        let first = &self.blocks[0];
        if first.kind.is_dynamic() {
            if first.action.is_empty() {
                "Unnamed Template".to_string()
            } else {
                first.action.clone()
            }
        } else {
            format!("{}_{}", first.kind.wire_name(), first.action)
        }
    }

    /// Total spatial footprint of this template.
    pub fn footprint(&self) -> u32 {
        footprint_of(&self.blocks)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Template(name: \"{}\", author: \"{}\", codeblocks: {})",
            self.name(),
            self.author,
            self.blocks.len()
        )
    }
}

/// Sum of block footprints over any block slice.
pub fn footprint_of(blocks: &[CodeBlock]) -> u32 {
    blocks.iter().map(|b| b.footprint()).sum()
}

/// Index of the close bracket balancing the open bracket at `open_index`,
/// found by a forward scan with a depth counter. `None` if `open_index` is not
/// an open bracket or the sequence ends before the scope closes.
pub fn find_matching_close(blocks: &[CodeBlock], open_index: usize) -> Option<usize> {
    match blocks.get(open_index).and_then(|b| b.bracket.as_ref()) {
        Some(bracket) if bracket.direction == Direction::Open => {}
        _ => return None,
    }

    let mut depth = 0i32;
    for (offset, block) in blocks[open_index..].iter().enumerate() {
        if let Some(bracket) = &block.bracket {
            match bracket.direction {
                Direction::Open => depth += 1,
                Direction::Close => depth -= 1,
            }
            if depth == 0 {
                return Some(open_index + offset);
            }
        }
    }
    None
}

/// Index ranges of a bracketed scope, resolved from its head block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRanges {
    /// Blocks strictly inside the bracket pair.
    pub body: Range<usize>,
    /// Index of the scope's close bracket.
    pub close: usize,
    /// Blocks strictly inside the `else` arm's brackets, when one follows.
    pub else_body: Option<Range<usize>>,
    /// Index of the `else` arm's close bracket.
    pub else_close: Option<usize>,
}

impl ScopeRanges {
    /// Index one past the last block belonging to this scope (its close
    /// bracket, or the `else` arm's close bracket).
    pub fn end(&self) -> usize {
        match self.else_close {
            Some(close) => close + 1,
            None => self.close + 1,
        }
    }
}

/// Resolve the bracket-body range of the conditional or `repeat` head at
/// `head_index`, plus the `else` arm's range if one immediately follows.
pub fn scope_ranges(blocks: &[CodeBlock], head_index: usize) -> Result<ScopeRanges, TemplateError> {
    let open = head_index + 1;
    let close =
        find_matching_close(blocks, open).ok_or(TemplateError::MissingBrackets { index: head_index })?;

    let mut ranges = ScopeRanges { body: open + 1..close, close, else_body: None, else_close: None };

    if blocks.get(close + 1).map(|b| b.kind) == Some(BlockKind::Else) {
        let else_open = close + 2;
        let else_close = find_matching_close(blocks, else_open)
            .ok_or(TemplateError::MissingBrackets { index: close + 1 })?;
        ranges.else_body = Some(else_open + 1..else_close);
        ranges.else_close = Some(else_close);
    }

    Ok(ranges)
}

fn validate_blocks(blocks: &[CodeBlock]) -> Result<(), TemplateError> {
    let first = blocks.first().ok_or(TemplateError::Empty)?;
    if !first.kind.is_starter() {
        return Err(TemplateError::BadStarter { kind: first.kind });
    }

    let mut open_stack: Vec<usize> = Vec::new();
    let mut close_to_open: HashMap<usize, usize> = HashMap::new();

    for (index, block) in blocks.iter().enumerate() {
        if let Some(bracket) = &block.bracket {
            match bracket.direction {
                Direction::Open => open_stack.push(index),
                Direction::Close => {
                    let open = open_stack.pop().ok_or(TemplateError::UnmatchedClose { index })?;
                    close_to_open.insert(index, open);
                }
            }
        }

        if block.kind.is_scope_head() || block.kind == BlockKind::Else {
            let next_is_open = blocks
                .get(index + 1)
                .and_then(|b| b.bracket.as_ref())
                .is_some_and(|b| b.direction == Direction::Open);
            if !next_is_open {
                return Err(TemplateError::MissingBrackets { index });
            }
        }

        if block.kind == BlockKind::Else {
            let preceded_by_scope_close = index
                .checked_sub(1)
                .and_then(|close| close_to_open.get(&close))
                .and_then(|open| open.checked_sub(1))
                .map(|head| blocks[head].kind.is_scope_head())
                .unwrap_or(false);
            if !preceded_by_scope_close {
                return Err(TemplateError::MisplacedElse { index });
            }
        }

        validate_slots(block, index)?;
    }

    if let Some(index) = open_stack.pop() {
        return Err(TemplateError::UnmatchedOpen { index });
    }

    Ok(())
}

/// Resolved slots (explicit or positional) must be strictly increasing in
/// declaration order. Anything else is ambiguous on the wire and is rejected
/// here rather than silently resolved.
fn validate_slots(block: &CodeBlock, index: usize) -> Result<(), TemplateError> {
    let mut last: Option<u32> = None;
    for (position, arg) in block.args.iter().enumerate() {
        let resolved = arg.slot.unwrap_or(position as u32);
        if last.is_some_and(|prev| resolved <= prev) {
            return Err(TemplateError::SlotConflict { index, slot: resolved });
        }
        last = Some(resolved);
    }
    Ok(())
}
