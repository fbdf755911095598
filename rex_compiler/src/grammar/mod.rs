//! Pattern grammar: the enumerated escape vocabulary and AST node types.

pub mod ast {
    pub mod nodes;
}
pub mod escapes;

pub use ast::nodes::PatternAst;
pub use escapes::{classify_escape, AnchorKind, ClassKind, EscapeClass, EscapeKind};
