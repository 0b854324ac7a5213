//! questc — one-shot transpiler from indentation-structured quest scripts
//! to brace-delimited Java quest classes.
//!
//! The translation engine is line-oriented, not a real parser: it tracks
//! nested block structure from leading whitespace, classifies each line
//! into a small set of statement shapes, and emits structurally balanced
//! Java with the declaration scaffolding the quest API expects. Unhandled
//! constructs degrade to best-effort output with a warning; only I/O
//! failures are fatal.

pub mod classify;
pub mod context;
pub mod emitter;
pub mod engine;
pub mod indent;
pub mod report;
pub mod signatures;

pub use context::QuestContext;
pub use engine::{ConvertedUnit, QuestConverter};
pub use report::ConversionReport;
pub use signatures::SignatureTable;
