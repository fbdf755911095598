//! Syntax analysis module
//!
//! Recursive-descent parsing of the scanned token stream into a
//! [`PatternAst`].

mod error;
pub mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::PatternParser;

use crate::grammar::ast::nodes::PatternAst;
use crate::tokens::TokenStream;

/// Parse a scanned token stream into an AST
pub fn parse_tokens(tokens: TokenStream) -> SyntaxResult<PatternAst> {
    let mut parser = PatternParser::new(tokens);
    parser.parse()
}

/// Validate that syntax diagnostic codes are properly configured
pub fn init_syntax_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::syntax::MISSING_EOP,
        crate::logging::codes::syntax::EMPTY_TOKEN_STREAM,
        crate::logging::codes::syntax::UNBALANCED_GROUP,
        crate::logging::codes::syntax::DANGLING_QUANTIFIER,
        crate::logging::codes::syntax::INVALID_CLASS_RANGE,
        crate::logging::codes::syntax::EMPTY_CLASS,
        crate::logging::codes::syntax::UNEXPECTED_TOKEN,
        crate::logging::codes::syntax::MAX_GROUP_DEPTH,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Syntax diagnostic code {} has no description",
                code.as_str()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::scan_pattern;
    use crate::source::PatternSource;

    #[test]
    fn test_parse_tokens_entry_point() {
        let source = PatternSource::from_raw("a|b").unwrap();
        let stream = scan_pattern(&source).unwrap();
        let ast = parse_tokens(stream).unwrap();
        assert_eq!(ast.branches.len(), 2);
    }

    #[test]
    fn test_init_logging() {
        assert!(init_syntax_logging().is_ok());
    }
}
