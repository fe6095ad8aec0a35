//! Decomposes an over-budget template into size-bounded, call-linked pieces.
//!
//! The body of a template is chunked into a forest: leaf blocks, and bracketed
//! scopes whose interiors are chunked recursively. Contiguous runs of sibling
//! chunks that fit the budget become extraction candidates; the largest one is
//! cut out into a freshly synthesized hidden function, a call to it takes its
//! place, and any `line`-scope variables referenced on both sides of the cut
//! are threaded through as parameters. This repeats until the remainder fits.
//!
//! The walk order, candidate selection (largest footprint, earliest start on
//! ties), and parameter ordering (sorted names) are all deterministic, so a
//! given template and budget always produce the same decomposition.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::{
    footprint_of, scope_ranges, ArgValue, Argument, BlockKind, CodeBlock, ParamType, Parameter,
    Template, TemplateError, VarScope,
};

/// Extra footprint introduced by one extraction: a function-definition header
/// in the extracted piece plus a call block in the remainder.
pub const EXTRACTION_OVERHEAD: u32 = 4;

/// Footprint reserved in every candidate for the call block that replaces it.
const CALL_RESERVE: u32 = 2;

#[derive(Debug, Error)]
pub enum SliceError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("budget {budget} is too small to extract anything from this template")]
    BudgetTooSmall { budget: u32 },
}

/// One node of the chunk forest: a leaf block, or a bracketed scope together
/// with its (recursively chunked) interior.
#[derive(Debug)]
struct Chunk {
    /// Raw footprint of every block in `start..end`, bracket overhead
    /// included.
    footprint: u32,
    start: usize,
    end: usize,
    body: Vec<Chunk>,
    else_body: Vec<Chunk>,
}

/// A contiguous run of sibling chunks, recorded as an extraction candidate.
/// `footprint` includes the call-site reserve.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    start: usize,
    end: usize,
    footprint: u32,
}

/// Slice `template` into pieces of footprint at most `target_length`.
///
/// Returns the remainder first, then the extracted functions in extraction
/// order. A template already within budget comes back unchanged as the sole
/// element. A single chunk that cannot be split without breaking bracket
/// nesting may exceed the budget in its own slice; that is a documented
/// limitation, not an error.
pub fn slice(template: &Template, target_length: u32) -> Result<Vec<Template>, SliceError> {
    if template.footprint() <= target_length {
        return Ok(vec![template.clone()]);
    }

    let base_name = template.name();
    let mut remainder = template.blocks.clone();
    let mut extracted = Vec::new();

    let mut number = 1;
    while footprint_of(&remainder) > target_length {
        let before = footprint_of(&remainder);
        let name = format!("{base_name}_{number}");
        let piece = extract_one(&mut remainder, target_length, &name)?;
        extracted.push(Template::new(piece)?.with_author(template.author.clone()));
        number += 1;

        if footprint_of(&remainder) >= before {
            // The only extractable runs are single minimum-size blocks; a call
            // site costs just as much, so no budget progress is possible.
            return Err(SliceError::BudgetTooSmall { budget: target_length });
        }
    }

    let mut slices = vec![Template::new(remainder)?.with_author(template.author.clone())];
    slices.extend(extracted);
    Ok(slices)
}

/// Cut the best candidate run out of `blocks`, replacing it with a call to a
/// new function named `name`, and return the extracted piece (function header
/// included).
fn extract_one(
    blocks: &mut Vec<CodeBlock>,
    target_length: u32,
    name: &str,
) -> Result<Vec<CodeBlock>, SliceError> {
    let forest = chunk_range(blocks, 0, blocks.len())?;
    let best = best_candidate(&forest, target_length)
        .ok_or(SliceError::BudgetTooSmall { budget: target_length })?;

    let cut: Vec<CodeBlock> = blocks.drain(best.start..best.end).collect();

    // Line-scope variables visible on both sides of the cut must be threaded
    // through the new call boundary, in a stable order.
    let shared: BTreeSet<String> =
        line_variables(blocks).intersection(&line_variables(&cut)).cloned().collect();
    let params = shared
        .iter()
        .map(|var| Argument::parameter(Parameter::new(var, ParamType::Variable)))
        .collect();
    let call_args = shared.iter().map(|var| Argument::line_variable(var)).collect();

    let header = CodeBlock::function_def(name, params).with_tag("Is Hidden", "True");
    let mut piece = Vec::with_capacity(cut.len() + 1);
    piece.push(header);
    piece.extend(cut);

    blocks.insert(best.start, CodeBlock::call_function(name, call_args));
    Ok(piece)
}

/// Chunk `blocks[start..end]` into a sibling list, descending into scopes.
fn chunk_range(blocks: &[CodeBlock], start: usize, end: usize) -> Result<Vec<Chunk>, SliceError> {
    let mut chunks = Vec::new();
    let mut index = start;

    while index < end {
        let block = &blocks[index];
        if block.kind == BlockKind::Bracket || block.kind.is_starter() {
            index += 1;
            continue;
        }

        if block.kind.is_scope_head() {
            let ranges = scope_ranges(blocks, index)?;
            let chunk_end = ranges.end();
            let body = chunk_range(blocks, ranges.body.start, ranges.body.end)?;
            let else_body = match &ranges.else_body {
                Some(range) => chunk_range(blocks, range.start, range.end)?,
                None => Vec::new(),
            };
            chunks.push(Chunk {
                footprint: footprint_of(&blocks[index..chunk_end]),
                start: index,
                end: chunk_end,
                body,
                else_body,
            });
            index = chunk_end;
        } else {
            chunks.push(Chunk {
                footprint: block.footprint(),
                start: index,
                end: index + 1,
                body: Vec::new(),
                else_body: Vec::new(),
            });
            index += 1;
        }
    }

    Ok(chunks)
}

/// Walk the whole forest and pick the candidate run with the largest
/// footprint, breaking ties toward the earliest start.
fn best_candidate(forest: &[Chunk], target_length: u32) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    let mut record = |candidate: Candidate| {
        let better = match best {
            None => true,
            Some(current) => {
                candidate.footprint > current.footprint
                    || (candidate.footprint == current.footprint && candidate.start < current.start)
            }
        };
        if better {
            best = Some(candidate);
        }
    };

    let mut pending: Vec<&[Chunk]> = vec![forest];
    while let Some(siblings) = pending.pop() {
        let mut run: Option<Candidate> = None;

        // Runs accumulate right-to-left so the run's end stays fixed while its
        // start advances toward the front of the sibling list.
        for chunk in siblings.iter().rev() {
            if !chunk.body.is_empty() {
                pending.push(&chunk.body);
            }
            if !chunk.else_body.is_empty() {
                pending.push(&chunk.else_body);
            }

            let current = run.get_or_insert(Candidate {
                start: chunk.start,
                end: chunk.end,
                footprint: CALL_RESERVE,
            });

            // A chunk that cannot fit even alone closes the current run; it is
            // only ever extracted whole, through its own range.
            if chunk.footprint > target_length.saturating_sub(CALL_RESERVE) {
                record(*current);
                run = None;
                continue;
            }

            let grown = current.footprint + chunk.footprint;
            if grown <= target_length {
                current.footprint = grown;
                current.start = chunk.start;
            } else {
                record(*current);
                *current = Candidate {
                    start: chunk.start,
                    end: chunk.end,
                    footprint: chunk.footprint + CALL_RESERVE,
                };
            }
        }

        if let Some(current) = run {
            record(current);
        }
    }

    best
}

/// Names of every `line`-scope variable referenced by argument items in
/// `blocks`.
fn line_variables(blocks: &[CodeBlock]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for block in blocks {
        for arg in &block.args {
            if let ArgValue::Variable { name, scope: VarScope::Line } = &arg.value {
                names.insert(name.clone());
            }
        }
    }
    names
}
