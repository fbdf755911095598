//! Recursive-descent pattern parser
//!
//! Consumes the scanner's token stream and produces a [`PatternAst`]. The
//! grammar is alternation at the top, branches of quantified atoms below,
//! with character-class bodies handled inline. Escapes no longer exist at
//! this level; the scanner resolved them into ordinary tokens.

use crate::config::constants::compile_time::syntax::*;
use crate::grammar::ast::nodes::{Atom, Branch, ClassExpr, ClassItem, PatternAst, Piece, Quantifier};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};
use std::collections::VecDeque;

/// Pattern parser with group-depth tracking and error history
pub struct PatternParser {
    tokens: TokenStream,
    context_stack: Vec<&'static str>,
    error_history: VecDeque<SyntaxError>,
    group_depth: usize,
}

impl PatternParser {
    /// Create new parser over a scanned token stream
    pub fn new(tokens: TokenStream) -> Self {
        log_debug!("Creating pattern parser", "tokens" => tokens.len());

        Self {
            tokens,
            context_stack: Vec::new(),
            error_history: VecDeque::new(),
            group_depth: 0,
        }
    }

    /// Parse the token stream into an AST
    pub fn parse(&mut self) -> SyntaxResult<PatternAst> {
        self.push_context("pattern");

        if self.tokens.is_empty() {
            let error = SyntaxError::EmptyTokenStream;
            log_error!(error.error_code(), "Cannot parse empty token stream");
            return Err(error);
        }

        if !self.tokens.has_eop() {
            let error = SyntaxError::MissingEop;
            log_error!(error.error_code(), "Token stream missing end-of-pattern token");
            return Err(error);
        }

        let result = self.parse_alternation();

        let result = result.and_then(|ast| match self.tokens.current_token() {
            Some(Token::Eop) | None => Ok(ast),
            Some(Token::CloseGroup) => Err(SyntaxError::UnbalancedGroup {
                span: self.current_span(),
            }),
            Some(other) => Err(SyntaxError::unexpected_token(
                "end of pattern",
                &other.as_pattern_string(),
                self.current_span(),
            )),
        });

        match result {
            Ok(ast) => {
                log_success!(codes::success::PARSE_COMPLETE,
                    "Pattern parsing completed successfully",
                    "branches" => ast.branches.len(),
                    "atoms" => ast.atom_count()
                );
                self.pop_context();
                Ok(ast)
            }
            Err(error) => {
                self.record_error(error.clone());
                log_error!(error.error_code(), "Pattern parsing failed",
                    span = error.span().unwrap_or_else(|| self.current_span()),
                    "context" => self.current_context(),
                    "position" => self.tokens.position()
                );
                self.pop_context();
                Err(error)
            }
        }
    }

    /// Get recent error history for diagnostics
    pub fn error_history(&self) -> Vec<&SyntaxError> {
        self.error_history.iter().collect()
    }

    // ========================================================================
    // Grammar productions
    // ========================================================================

    /// alternation := branch ('|' branch)*
    fn parse_alternation(&mut self) -> SyntaxResult<PatternAst> {
        self.push_context("alternation");
        let start_pos = self.tokens.position();

        let mut branches = vec![self.parse_branch()?];

        while matches!(self.tokens.current_token(), Some(Token::Alternation)) {
            self.tokens.advance();
            branches.push(self.parse_branch()?);
        }

        let span = self.span_since(start_pos);
        self.pop_context();
        Ok(PatternAst::new(branches, span))
    }

    /// branch := piece*  (possibly empty, as in `a|`)
    fn parse_branch(&mut self) -> SyntaxResult<Branch> {
        let start_pos = self.tokens.position();
        let mut pieces = Vec::new();

        loop {
            match self.tokens.current_token() {
                None | Some(Token::Eop) | Some(Token::Alternation) | Some(Token::CloseGroup) => {
                    break;
                }
                Some(_) => pieces.push(self.parse_piece()?),
            }
        }

        let span = self.span_since(start_pos);
        Ok(Branch::new(pieces, span))
    }

    /// piece := atom quantifier?
    fn parse_piece(&mut self) -> SyntaxResult<Piece> {
        let start_pos = self.tokens.position();
        let atom = self.parse_atom()?;

        let is_anchor = matches!(atom, Atom::Anchor(_));
        let quantifier = self.parse_quantifier(is_anchor)?;

        let span = self.span_since(start_pos);
        Ok(Piece {
            atom,
            quantifier,
            span,
        })
    }

    fn parse_atom(&mut self) -> SyntaxResult<Atom> {
        let spanned = match self.tokens.current() {
            Some(spanned) => spanned.clone(),
            None => return Err(SyntaxError::unexpected_end_of_pattern("an atom")),
        };

        match spanned.value {
            Token::Literal(c) => {
                self.tokens.advance();
                Ok(Atom::Literal(c))
            }
            Token::Dot => {
                self.tokens.advance();
                Ok(Atom::Dot)
            }
            Token::Shorthand(kind) => {
                self.tokens.advance();
                Ok(Atom::Shorthand(kind))
            }
            Token::Anchor(kind) => {
                self.tokens.advance();
                Ok(Atom::Anchor(kind))
            }
            Token::OpenGroup => self.parse_group(spanned.span),
            Token::OpenClass => self.parse_class(spanned.span),
            ref quantifier if quantifier.is_quantifier() => Err(SyntaxError::DanglingQuantifier {
                span: spanned.span,
            }),
            ref other => Err(SyntaxError::internal_parser_error(&format!(
                "token '{}' escaped its scanning context",
                other.as_pattern_string()
            ))),
        }
    }

    /// group := '(' alternation ')'
    fn parse_group(&mut self, open_span: Span) -> SyntaxResult<Atom> {
        if self.group_depth >= MAX_GROUP_DEPTH {
            let error = SyntaxError::MaxGroupDepth { span: open_span };
            log_error!(error.error_code(), "Group nesting too deep",
                span = open_span,
                "depth" => self.group_depth,
                "max_depth" => MAX_GROUP_DEPTH
            );
            return Err(error);
        }

        self.push_context("group");
        self.tokens.advance(); // consume '('
        self.group_depth += 1;

        let inner = self.parse_alternation();

        self.group_depth -= 1;
        let inner = inner?;

        if !matches!(self.tokens.current_token(), Some(Token::CloseGroup)) {
            self.pop_context();
            return Err(SyntaxError::UnbalancedGroup { span: open_span });
        }
        self.tokens.advance(); // consume ')'

        self.pop_context();
        Ok(Atom::Group(Box::new(inner)))
    }

    /// class := '[' '^'? class_item+ ']'
    fn parse_class(&mut self, open_span: Span) -> SyntaxResult<Atom> {
        self.push_context("class");
        self.tokens.advance(); // consume '['

        let negated = self.tokens.advance_if_matches(&Token::ClassNegate);
        let mut items = Vec::new();

        loop {
            let spanned = match self.tokens.current() {
                Some(spanned) => spanned.clone(),
                None => {
                    self.pop_context();
                    return Err(SyntaxError::internal_parser_error(
                        "character class not terminated by scanner",
                    ));
                }
            };

            match spanned.value {
                Token::CloseClass => {
                    self.tokens.advance();
                    break;
                }
                Token::Literal(lo) => {
                    self.tokens.advance();
                    items.push(self.parse_class_member(lo, spanned.span)?);
                }
                Token::RangeDash => {
                    // Dash that is first, last, or follows a shorthand is a
                    // literal member
                    self.tokens.advance();
                    items.push(ClassItem::Single('-'));
                }
                Token::Shorthand(kind) => {
                    self.tokens.advance();
                    items.push(ClassItem::Shorthand(kind));
                }
                ref other => {
                    self.pop_context();
                    return Err(SyntaxError::internal_parser_error(&format!(
                        "token '{}' inside character class",
                        other.as_pattern_string()
                    )));
                }
            }
        }

        self.pop_context();

        if items.is_empty() {
            let class_span = open_span.merge(self.current_span());
            return Err(SyntaxError::EmptyClass { span: class_span });
        }

        let class_span = open_span.merge(self.current_span());
        Ok(Atom::Class(ClassExpr {
            negated,
            items,
            span: class_span,
        }))
    }

    /// One class member starting with literal `lo`: either a range `lo-hi`
    /// or the single scalar.
    fn parse_class_member(&mut self, lo: char, lo_span: Span) -> SyntaxResult<ClassItem> {
        if !matches!(self.tokens.current_token(), Some(Token::RangeDash)) {
            return Ok(ClassItem::Single(lo));
        }

        // Dash before the closing bracket is a literal; leave it for the
        // item loop
        match self.tokens.peek().map(|t| &t.value) {
            Some(Token::Literal(_)) => {
                self.tokens.advance(); // consume '-'
                let hi_spanned = self
                    .tokens
                    .current()
                    .cloned()
                    .ok_or_else(|| SyntaxError::unexpected_end_of_pattern("range endpoint"))?;
                let hi = match hi_spanned.value {
                    Token::Literal(hi) => hi,
                    _ => unreachable!("peeked a literal"),
                };
                self.tokens.advance();

                if lo > hi {
                    return Err(SyntaxError::InvalidClassRange {
                        lo,
                        hi,
                        span: lo_span.merge(hi_spanned.span),
                    });
                }
                Ok(ClassItem::Range(lo, hi))
            }
            _ => Ok(ClassItem::Single(lo)),
        }
    }

    /// Optional quantifier after an atom. Anchors take no quantifier; a
    /// second quantifier in a row has nothing to repeat.
    fn parse_quantifier(&mut self, after_anchor: bool) -> SyntaxResult<Quantifier> {
        let spanned = match self.tokens.current() {
            Some(spanned) if spanned.value.is_quantifier() => spanned.clone(),
            _ => return Ok(Quantifier::one()),
        };

        if after_anchor {
            return Err(SyntaxError::DanglingQuantifier { span: spanned.span });
        }

        let quantifier = match spanned.value {
            Token::Star => Quantifier::star(),
            Token::Plus => Quantifier::plus(),
            Token::Question => Quantifier::question(),
            Token::Bounded { min, max } => Quantifier::bounded(min, max),
            _ => unreachable!("is_quantifier matched"),
        };
        self.tokens.advance();

        // `a**` and friends
        if let Some(next) = self.tokens.current() {
            if next.value.is_quantifier() {
                return Err(SyntaxError::DanglingQuantifier { span: next.span });
            }
        }

        Ok(quantifier)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn current_span(&self) -> Span {
        self.tokens.current_span().unwrap_or_else(Span::dummy)
    }

    /// Span from the token at `start_pos` up to the last consumed token
    fn span_since(&self, start_pos: usize) -> Span {
        let end_pos = self.tokens.position().saturating_sub(1);
        if end_pos < start_pos {
            return self.current_span();
        }
        self.tokens.span_range(start_pos, end_pos)
    }

    fn push_context(&mut self, context: &'static str) {
        self.context_stack.push(context);
    }

    fn pop_context(&mut self) {
        self.context_stack.pop();
    }

    fn current_context(&self) -> String {
        self.context_stack.join(" -> ")
    }

    fn record_error(&mut self, error: SyntaxError) {
        if self.error_history.len() >= MAX_ERROR_HISTORY {
            self.error_history.pop_front();
        }
        self.error_history.push_back(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::escapes::{AnchorKind, ClassKind};
    use crate::lexical::scan_pattern;
    use crate::source::PatternSource;
    use assert_matches::assert_matches;

    fn parse(pattern: &str) -> SyntaxResult<PatternAst> {
        let source = PatternSource::from_raw(pattern).unwrap();
        let stream = scan_pattern(&source).expect("scan failed");
        PatternParser::new(stream).parse()
    }

    #[test]
    fn test_single_literal() {
        let ast = parse("a").unwrap();
        assert_eq!(ast.branches.len(), 1);
        assert_eq!(ast.branches[0].pieces.len(), 1);
        assert_eq!(ast.branches[0].pieces[0].atom, Atom::Literal('a'));
        assert!(ast.branches[0].pieces[0].quantifier.is_one());
    }

    #[test]
    fn test_alternation() {
        let ast = parse("a|b|c").unwrap();
        assert_eq!(ast.branches.len(), 3);
    }

    #[test]
    fn test_trailing_empty_branch() {
        let ast = parse("a|").unwrap();
        assert_eq!(ast.branches.len(), 2);
        assert!(ast.branches[1].is_empty());
    }

    #[test]
    fn test_quantifiers() {
        let ast = parse("a*b+c?d{2,5}").unwrap();
        let pieces = &ast.branches[0].pieces;
        assert_eq!(pieces[0].quantifier, Quantifier::star());
        assert_eq!(pieces[1].quantifier, Quantifier::plus());
        assert_eq!(pieces[2].quantifier, Quantifier::question());
        assert_eq!(pieces[3].quantifier, Quantifier::bounded(2, Some(5)));
    }

    #[test]
    fn test_dangling_quantifier() {
        assert_matches!(parse("*a"), Err(SyntaxError::DanglingQuantifier { .. }));
        assert_matches!(parse("a**"), Err(SyntaxError::DanglingQuantifier { .. }));
        assert_matches!(parse("^*"), Err(SyntaxError::DanglingQuantifier { .. }));
    }

    #[test]
    fn test_group_nesting() {
        let ast = parse("(a(b))").unwrap();
        let outer = match &ast.branches[0].pieces[0].atom {
            Atom::Group(inner) => inner,
            other => panic!("expected group, got {:?}", other),
        };
        assert_eq!(outer.branches[0].pieces.len(), 2);
    }

    #[test]
    fn test_unbalanced_groups() {
        assert_matches!(parse("(ab"), Err(SyntaxError::UnbalancedGroup { .. }));
        assert_matches!(parse("ab)"), Err(SyntaxError::UnbalancedGroup { .. }));
    }

    #[test]
    fn test_class_with_range() {
        let ast = parse("[a-z0]").unwrap();
        match &ast.branches[0].pieces[0].atom {
            Atom::Class(class) => {
                assert!(!class.negated);
                assert_eq!(
                    class.items,
                    vec![ClassItem::Range('a', 'z'), ClassItem::Single('0')]
                );
            }
            other => panic!("expected class, got {:?}", other),
        }
    }

    #[test]
    fn test_negated_class() {
        let ast = parse("[^ab]").unwrap();
        match &ast.branches[0].pieces[0].atom {
            Atom::Class(class) => assert!(class.negated),
            other => panic!("expected class, got {:?}", other),
        }
    }

    #[test]
    fn test_class_regression_redundant_escape() {
        // `[\§]` and `[§]` must parse into identical class expressions
        let escaped = parse("[\\§]").unwrap();
        let bare = parse("[§]").unwrap();
        assert_eq!(
            escaped.branches[0].pieces[0].atom,
            bare.branches[0].pieces[0].atom
        );
    }

    #[test]
    fn test_dash_literal_positions() {
        // Leading and trailing dash are literal members
        let ast = parse("[-a-]").unwrap();
        match &ast.branches[0].pieces[0].atom {
            Atom::Class(class) => {
                assert_eq!(
                    class.items,
                    vec![
                        ClassItem::Single('-'),
                        ClassItem::Single('a'),
                        ClassItem::Single('-')
                    ]
                );
            }
            other => panic!("expected class, got {:?}", other),
        }
    }

    #[test]
    fn test_shorthand_not_a_range_endpoint() {
        let ast = parse("[\\d-x]").unwrap();
        match &ast.branches[0].pieces[0].atom {
            Atom::Class(class) => {
                assert_eq!(
                    class.items,
                    vec![
                        ClassItem::Shorthand(ClassKind::Digit),
                        ClassItem::Single('-'),
                        ClassItem::Single('x')
                    ]
                );
            }
            other => panic!("expected class, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_class_range() {
        assert_matches!(
            parse("[z-a]"),
            Err(SyntaxError::InvalidClassRange { lo: 'z', hi: 'a', .. })
        );
    }

    #[test]
    fn test_empty_class() {
        assert_matches!(parse("[]"), Err(SyntaxError::EmptyClass { .. }));
        assert_matches!(parse("[^]"), Err(SyntaxError::EmptyClass { .. }));
    }

    #[test]
    fn test_anchors_parse() {
        let ast = parse("^a$").unwrap();
        let pieces = &ast.branches[0].pieces;
        assert_eq!(pieces[0].atom, Atom::Anchor(AnchorKind::LineStart));
        assert_eq!(pieces[2].atom, Atom::Anchor(AnchorKind::LineEnd));
    }

    #[test]
    fn test_shorthand_atom() {
        let ast = parse("\\d+").unwrap();
        assert_eq!(
            ast.branches[0].pieces[0].atom,
            Atom::Shorthand(ClassKind::Digit)
        );
        assert_eq!(ast.branches[0].pieces[0].quantifier, Quantifier::plus());
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let deep = "(".repeat(MAX_GROUP_DEPTH + 1)
            + "a"
            + &")".repeat(MAX_GROUP_DEPTH + 1);
        assert_matches!(parse(&deep), Err(SyntaxError::MaxGroupDepth { .. }));
    }
}
