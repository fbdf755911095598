//! Span-accurate token stream management for the pattern parser
//!
//! In free-spacing mode the scanner emits whitespace and comment tokens that
//! the parser must never see; the stream keeps every token with its original
//! span and exposes a filtered view of significant tokens, so diagnostics
//! stay byte-accurate even when the parser skips formatting.

use crate::tokens::token::Token;
use crate::utils::{Position, Span, Spanned};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

/// Span-accurate token stream with significant-token filtering
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// All tokens (including whitespace and comments) with original spans
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant tokens
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
}

impl TokenStream {
    /// Create a new token stream with automatic filtering
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.value.is_significant())
            .map(|(i, _)| i)
            .collect();

        Self {
            all_tokens: tokens,
            significant_indices,
            position: 0,
        }
    }

    // === CORE NAVIGATION ===

    /// Get the current significant token with accurate span
    pub fn current(&self) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Get the current token value (without span)
    pub fn current_token(&self) -> Option<&Token> {
        self.current().map(|spanned| &spanned.value)
    }

    /// Get the accurate span of the current token
    pub fn current_span(&self) -> Option<Span> {
        self.current().map(|spanned| spanned.span)
    }

    /// Peek at the next significant token without advancing
    pub fn peek(&self) -> Option<&SpannedToken> {
        self.peek_ahead(1)
    }

    /// Peek ahead by n positions in significant tokens
    pub fn peek_ahead(&self, n: usize) -> Option<&SpannedToken> {
        self.significant_indices
            .get(self.position + n)
            .and_then(|&original_index| self.all_tokens.get(original_index))
    }

    /// Advance to the next significant token
    pub fn advance(&mut self) -> Option<&SpannedToken> {
        if self.position < self.significant_indices.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Check if we're at the end of significant tokens
    pub fn is_at_end(&self) -> bool {
        self.position >= self.significant_indices.len()
    }

    /// Get the number of significant tokens
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    /// Check if the stream has no significant tokens
    pub fn is_empty(&self) -> bool {
        self.significant_indices.is_empty()
    }

    // === SPAN ACCURACY ===

    /// Get span at a specific position in significant tokens
    pub fn span_at_position(&self, position: usize) -> Option<Span> {
        self.significant_indices
            .get(position)
            .and_then(|&original_index| self.all_tokens.get(original_index))
            .map(|spanned| spanned.span)
    }

    /// Get span covering a range of significant token positions
    pub fn span_range(&self, start_pos: usize, end_pos: usize) -> Span {
        let start_span = self.span_at_position(start_pos);
        let end_span = self.span_at_position(end_pos);

        match (start_span, end_span) {
            (Some(start), Some(end)) => start.merge(end),
            (Some(start), None) => start,
            (None, Some(end)) => end,
            (None, None) => Span::dummy(),
        }
    }

    // === PARSER INTEGRATION ===

    /// Check if current token matches expected (by discriminant)
    pub fn check_token(&self, expected: &Token) -> bool {
        self.current_token()
            .map(|token| std::mem::discriminant(token) == std::mem::discriminant(expected))
            .unwrap_or(false)
    }

    /// Consume the next token if it matches predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<SpannedToken>
    where
        F: FnOnce(&Token) -> bool,
    {
        if let Some(token) = self.current_token() {
            if predicate(token) {
                let result = self.current().cloned();
                self.advance();
                return result;
            }
        }
        None
    }

    /// Advance if current token matches expected
    pub fn advance_if_matches(&mut self, expected: &Token) -> bool {
        if self.check_token(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific token with accurate error span reporting
    pub fn expect_token(&mut self, expected: Token) -> Result<SpannedToken, TokenStreamError> {
        if let Some(current) = self.current() {
            if std::mem::discriminant(&current.value) == std::mem::discriminant(&expected) {
                let result = current.clone();
                self.advance();
                Ok(result)
            } else {
                Err(TokenStreamError::UnexpectedToken {
                    expected: expected.as_pattern_string(),
                    found: current.value.as_pattern_string(),
                    span: current.span,
                })
            }
        } else {
            Err(TokenStreamError::UnexpectedEndOfStream {
                expected: expected.as_pattern_string(),
            })
        }
    }

    // === ADVANCED NAVIGATION ===

    /// Save current position as checkpoint for backtracking
    pub fn save_position(&self) -> usize {
        self.position
    }

    /// Restore position from checkpoint
    pub fn restore_position(&mut self, saved_position: usize) {
        self.position = saved_position.min(self.significant_indices.len());
    }

    // === ITERATION ===

    /// Get an iterator over significant tokens with spans
    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .map(|&i| &self.all_tokens[i])
    }

    /// Get all tokens (including non-significant) with spans
    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    // === DEBUGGING AND DIAGNOSTICS ===

    /// Get current position for debugging
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check the stream terminates with the end-of-pattern token
    pub fn has_eop(&self) -> bool {
        self.significant_indices
            .last()
            .and_then(|&idx| self.all_tokens.get(idx))
            .map(|token| matches!(token.value, Token::Eop))
            .unwrap_or(false)
    }

    /// Get context around current position for error reporting
    pub fn context_snippet(&self, radius: usize) -> Vec<&SpannedToken> {
        let start = self.position.saturating_sub(radius);
        let end = (self.position + radius + 1).min(self.significant_indices.len());

        (start..end)
            .filter_map(|pos| {
                self.significant_indices
                    .get(pos)
                    .and_then(|&idx| self.all_tokens.get(idx))
            })
            .collect()
    }
}

/// Token stream errors with span accuracy
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStreamError {
    /// Unexpected token found with accurate span
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    /// Unexpected end of stream
    UnexpectedEndOfStream { expected: String },
}

impl std::fmt::Display for TokenStreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken {
                expected,
                found,
                span,
            } => {
                write!(f, "Expected '{}', found '{}' at {}", expected, found, span)
            }
            Self::UnexpectedEndOfStream { expected } => {
                write!(f, "Expected '{}', but reached end of pattern", expected)
            }
        }
    }
}

impl std::error::Error for TokenStreamError {}

/// Token stream builder with position tracking, for tests and synthesized
/// streams
#[derive(Debug, Default)]
pub struct TokenStreamBuilder {
    tokens: Vec<SpannedToken>,
    current_position: Position,
}

impl TokenStreamBuilder {
    /// Create a new builder starting at the beginning of a pattern
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    /// Add a token with calculated span
    pub fn push_token(mut self, token: Token, text: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(text);
        let span = Span::new(start, end);

        self.tokens.push(SpannedToken::new(token, span));
        self.current_position = end;
        self
    }

    /// Build the token stream
    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(tokens: Vec<(Token, &str)>) -> TokenStream {
        let mut builder = TokenStreamBuilder::new();
        for (token, text) in tokens {
            builder = builder.push_token(token, text);
        }
        builder.build()
    }

    #[test]
    fn test_navigation() {
        let mut stream = stream_of(vec![
            (Token::Literal('a'), "a"),
            (Token::Star, "*"),
            (Token::Eop, ""),
        ]);

        assert_eq!(stream.len(), 3);
        assert_eq!(stream.current_token(), Some(&Token::Literal('a')));
        stream.advance();
        assert_eq!(stream.current_token(), Some(&Token::Star));
        stream.advance();
        assert_eq!(stream.current_token(), Some(&Token::Eop));
    }

    #[test]
    fn test_whitespace_filtered_but_spans_kept() {
        let stream = stream_of(vec![
            (Token::Literal('a'), "a"),
            (Token::Whitespace(' '), " "),
            (Token::Literal('b'), "b"),
            (Token::Eop, ""),
        ]);

        // Whitespace is not significant
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.all_tokens().len(), 4);

        // The second significant token starts after the whitespace byte
        let span = stream.span_at_position(1).unwrap();
        assert_eq!(span.start.offset, 2);
    }

    #[test]
    fn test_multibyte_span_accuracy() {
        let stream = stream_of(vec![
            (Token::Literal('§'), "§"),
            (Token::Literal('b'), "b"),
            (Token::Eop, ""),
        ]);

        let first = stream.span_at_position(0).unwrap();
        assert_eq!(first.len(), 2); // two bytes, one scalar
        let second = stream.span_at_position(1).unwrap();
        assert_eq!(second.start.offset, 2);
        assert_eq!(second.start.column, 2);
    }

    #[test]
    fn test_expect_token() {
        let mut stream = stream_of(vec![(Token::OpenGroup, "("), (Token::Eop, "")]);

        assert!(stream.expect_token(Token::OpenGroup).is_ok());
        let err = stream.expect_token(Token::CloseGroup).unwrap_err();
        match err {
            TokenStreamError::UnexpectedToken { expected, found, .. } => {
                assert_eq!(expected, ")");
                assert_eq!(found, "<EOP>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_checkpoints() {
        let mut stream = stream_of(vec![
            (Token::Literal('a'), "a"),
            (Token::Literal('b'), "b"),
            (Token::Eop, ""),
        ]);

        let checkpoint = stream.save_position();
        stream.advance();
        stream.advance();
        stream.restore_position(checkpoint);
        assert_eq!(stream.current_token(), Some(&Token::Literal('a')));
    }

    #[test]
    fn test_has_eop() {
        let with_eop = stream_of(vec![(Token::Literal('a'), "a"), (Token::Eop, "")]);
        assert!(with_eop.has_eop());

        let without = stream_of(vec![(Token::Literal('a'), "a")]);
        assert!(!without.has_eop());
    }

    #[test]
    fn test_discriminant_matching_ignores_payload() {
        let stream = stream_of(vec![(Token::Literal('x'), "x"), (Token::Eop, "")]);
        assert!(stream.check_token(&Token::Literal('y')));
        assert!(!stream.check_token(&Token::Dot));
    }
}
