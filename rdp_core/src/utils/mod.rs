//! Shared primitive types for the tokenizer and the cursor: source
//! positions, spans and line-indexed source maps used for caret diagrams.

pub mod span;

pub use span::{caret_marker, render_caret_diagram, Position, SourceMap, Span};
