//! Core data model (IR) for codeblocks, arguments, and templates.
//!
//! Everything here is an immutable value object: blocks and templates are
//! built once (through constructors or the codec) and transformations always
//! produce new values.

pub mod arg;
pub mod block;
pub mod template;

pub use arg::{ArgValue, Argument, Number, ParamType, Parameter, VarScope};
pub use block::{else_arm, BlockKind, Bracket, CodeBlock, Direction, ScopeKind, Target};
pub use template::{
    find_matching_close, footprint_of, scope_ranges, ScopeRanges, Template, TemplateError,
    DEFAULT_AUTHOR,
};
