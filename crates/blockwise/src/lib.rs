//! # blockwise
//!
//! Parser and schedule evaluator for the plain-text block format.
//!
//! A block is a small record of colon-separated fields (`title`, `notes`,
//! `tags`, `tasks`, `timezone`, `schedule`) with `"""`-delimited multi-line
//! values. Its schedule is an ordered list of `set`/`end` events, each with
//! an optional human-written date expression; the evaluator walks that list
//! to decide whether the block is active at a given instant.
//!
//! ## Modules
//!
//! - [`tokenize`] — block text → lexical [`Field`]s with exact line ranges
//! - [`interpret`] — one field → one typed attribute update
//! - [`block`] — the [`Block`] record and the full parse pipeline
//! - [`vars`] — `{name}` placeholder substitution over raw text
//! - [`resolve`] — the [`DateResolver`] capability and the built-in
//!   natural-language resolver
//! - [`evaluate`] — schedule timeline generation and active-state evaluation
//! - [`error`] — Error types

pub mod block;
pub mod error;
pub mod evaluate;
pub mod interpret;
pub mod resolve;
pub mod tokenize;
pub mod vars;

pub use block::{Action, Block, ScheduleEntry};
pub use error::{BlockError, Result};
pub use evaluate::{evaluate, generate_timeline, ScheduleState, TimelineEntry};
pub use interpret::{interpret, parse_schedule, FieldUpdate};
pub use resolve::{DateResolver, NaturalDateResolver, CHAIN_OPERATOR};
pub use tokenize::{tokenize, Field, QUOTE_MARKER};
pub use vars::substitute;
