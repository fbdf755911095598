//! Token system for pattern scanning
//!
//! The scanner emits one token per syntactic unit of the pattern. Escape
//! handling is resolved before tokens exist: a redundant escape and the bare
//! character produce the same `Literal` token, so everything downstream is
//! escape-agnostic by construction.

use crate::grammar::escapes::{AnchorKind, ClassKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens produced by the pattern scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    // === CONSUMING UNITS ===
    /// One literal scalar value. Sources: bare character, meaningful literal
    /// escape (`\.`), control escape (`\n`), or redundant escape (`\§`).
    Literal(char),
    /// `.` outside a class
    Dot,
    /// Class shorthand (`\d`, `\W`, ...)
    Shorthand(ClassKind),

    // === ZERO-WIDTH UNITS ===
    /// Anchor (`^`, `$`, `\b`, `\B`, `\A`, `\z`)
    Anchor(AnchorKind),

    // === STRUCTURE ===
    /// `|`
    Alternation,
    /// `(`
    OpenGroup,
    /// `)`
    CloseGroup,
    /// `[`
    OpenClass,
    /// `]` inside a class
    CloseClass,
    /// `^` immediately after `[`
    ClassNegate,
    /// Unescaped `-` inside a class; the parser decides range vs literal
    RangeDash,

    // === QUANTIFIERS ===
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `{min}`, `{min,}` or `{min,max}`
    Bounded { min: u32, max: Option<u32> },

    // === FREE-SPACING MODE ONLY ===
    /// Unescaped whitespace outside a class (ignored by the parser)
    Whitespace(char),
    /// `#` to end of line outside a class (ignored by the parser)
    Comment(String),

    /// End of pattern marker
    Eop,
}

impl Token {
    /// Check if this token is a quantifier
    pub fn is_quantifier(&self) -> bool {
        matches!(
            self,
            Self::Star | Self::Plus | Self::Question | Self::Bounded { .. }
        )
    }

    /// Check if this token consumes input when matched
    pub fn is_consuming(&self) -> bool {
        matches!(self, Self::Literal(_) | Self::Dot | Self::Shorthand(_))
    }

    /// Check if this token only appears inside a character class
    pub fn is_class_only(&self) -> bool {
        matches!(self, Self::CloseClass | Self::ClassNegate | Self::RangeDash)
    }

    /// Check if this token should be ignored during parsing
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::Whitespace(_) | Self::Comment(_))
    }

    pub fn is_significant(&self) -> bool {
        !self.is_ignorable()
    }

    /// Get the token as it would appear in pattern source
    pub fn as_pattern_string(&self) -> String {
        match self {
            Self::Literal(c) => c.to_string(),
            Self::Dot => ".".to_string(),
            Self::Shorthand(kind) => format!("\\{}", kind.letter()),
            Self::Anchor(kind) => kind.as_str().to_string(),
            Self::Alternation => "|".to_string(),
            Self::OpenGroup => "(".to_string(),
            Self::CloseGroup => ")".to_string(),
            Self::OpenClass => "[".to_string(),
            Self::CloseClass => "]".to_string(),
            Self::ClassNegate => "^".to_string(),
            Self::RangeDash => "-".to_string(),
            Self::Star => "*".to_string(),
            Self::Plus => "+".to_string(),
            Self::Question => "?".to_string(),
            Self::Bounded { min, max } => match max {
                Some(max) if max == min => format!("{{{}}}", min),
                Some(max) => format!("{{{},{}}}", min, max),
                None => format!("{{{},}}", min),
            },
            Self::Whitespace(c) => c.to_string(),
            Self::Comment(text) => format!("#{}", text),
            Self::Eop => "<EOP>".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_pattern_string())
    }
}

/// Token classification for metrics and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Consuming units (literals, dot, shorthands)
    Consuming,
    /// Zero-width assertions
    Anchor,
    /// Group and class structure
    Structure,
    /// Quantifiers
    Quantifier,
    /// Free-spacing whitespace and comments
    Ignorable,
    /// End of pattern
    Special,
}

impl Token {
    /// Get the classification of this token
    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Literal(_) | Self::Dot | Self::Shorthand(_) => TokenClass::Consuming,
            Self::Anchor(_) => TokenClass::Anchor,
            Self::Alternation
            | Self::OpenGroup
            | Self::CloseGroup
            | Self::OpenClass
            | Self::CloseClass
            | Self::ClassNegate
            | Self::RangeDash => TokenClass::Structure,
            Self::Star | Self::Plus | Self::Question | Self::Bounded { .. } => {
                TokenClass::Quantifier
            }
            Self::Whitespace(_) | Self::Comment(_) => TokenClass::Ignorable,
            Self::Eop => TokenClass::Special,
        }
    }
}
