//! Token system for pattern scanning
//!
//! Converts raw pattern text into a structured stream of tokens consumed by
//! the parser. Escape classification happens during scanning, so the token
//! stream never contains a backslash: a meaningful escape becomes its
//! dedicated token, a redundant escape becomes the same `Literal` token the
//! bare character would have produced.
//!
//! ## Key components
//!
//! - [`Token`] - enumeration of all pattern token types
//! - [`TokenStream`] - stream management with lookahead and significant-token
//!   filtering (free-spacing whitespace and comments are kept with spans but
//!   hidden from the parser)
//! - [`SpannedToken`] - tokens with pattern location information

pub mod token;
pub mod token_stream;

// Re-export key types for convenience
pub use token::{Token, TokenClass};
pub use token_stream::{SpannedToken, TokenStream, TokenStreamBuilder, TokenStreamError};

// Re-export span types from utils
pub use crate::utils::{Position, Span, Spanned};
