//! Shared primitive types for the pattern scanner, parser and compiler.
//!
//! Location tracking is scalar-accurate: offsets are byte offsets into the
//! pattern text, columns count Unicode scalar values, never bytes.

pub mod span;

pub use span::{Position, PatternExcerpt, Span, Spanned};
