//! AST node types for parsed patterns
//!
//! The parser produces a `PatternAst`: an alternation of branches, each a
//! sequence of quantified atoms. Nodes carry spans for diagnostics and serde
//! derives for pipeline output.

use crate::grammar::escapes::{AnchorKind, ClassKind};
use crate::utils::Span;
use serde::{Deserialize, Serialize};

/// A parsed pattern: alternation of branches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAst {
    pub branches: Vec<Branch>,
    pub span: Span,
}

impl PatternAst {
    pub fn new(branches: Vec<Branch>, span: Span) -> Self {
        Self { branches, span }
    }

    /// Total number of atoms across all branches (groups counted recursively)
    pub fn atom_count(&self) -> usize {
        self.branches
            .iter()
            .flat_map(|b| b.pieces.iter())
            .map(|p| match &p.atom {
                Atom::Group(inner) => 1 + inner.atom_count(),
                _ => 1,
            })
            .sum()
    }
}

/// One alternation branch: a sequence of quantified atoms.
/// A branch may be empty (`a|` has a second, empty branch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub pieces: Vec<Piece>,
    pub span: Span,
}

impl Branch {
    pub fn new(pieces: Vec<Piece>, span: Span) -> Self {
        Self { pieces, span }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// An atom with its quantifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub atom: Atom,
    pub quantifier: Quantifier,
    pub span: Span,
}

/// Repetition bounds. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantifier {
    pub min: u32,
    pub max: Option<u32>,
}

impl Quantifier {
    /// Exactly once (no quantifier written)
    pub const fn one() -> Self {
        Self {
            min: 1,
            max: Some(1),
        }
    }

    /// `*` - zero or more
    pub const fn star() -> Self {
        Self { min: 0, max: None }
    }

    /// `+` - one or more
    pub const fn plus() -> Self {
        Self { min: 1, max: None }
    }

    /// `?` - zero or one
    pub const fn question() -> Self {
        Self {
            min: 0,
            max: Some(1),
        }
    }

    /// `{min,max}` bounds as written
    pub const fn bounded(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// True for the implicit exactly-once quantifier
    pub fn is_one(&self) -> bool {
        self.min == 1 && self.max == Some(1)
    }
}

impl Default for Quantifier {
    fn default() -> Self {
        Self::one()
    }
}

/// A single matchable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    /// One literal scalar value (from a bare character, a meaningful literal
    /// escape, a control escape, or a redundant escape)
    Literal(char),
    /// `.` - any scalar except newline
    Dot,
    /// Class shorthand used as an atom (`\d` outside a class)
    Shorthand(ClassKind),
    /// Zero-width assertion
    Anchor(AnchorKind),
    /// Bracketed character class
    Class(ClassExpr),
    /// Parenthesized group
    Group(Box<PatternAst>),
}

/// A bracketed character class `[...]` / `[^...]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassExpr {
    pub negated: bool,
    pub items: Vec<ClassItem>,
    pub span: Span,
}

/// One member of a character class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClassItem {
    /// Single scalar value
    Single(char),
    /// Inclusive scalar range `lo-hi`
    Range(char, char),
    /// Embedded shorthand (`[\d]`)
    Shorthand(ClassKind),
}
