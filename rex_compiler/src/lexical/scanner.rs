//! Core pattern scanner implementation
//!
//! Single forward scan over the pattern's Unicode scalar values. The scanner
//! owns the character-class bracket state and consults the escape classifier
//! at every backslash; by the time a token exists, escapes are fully
//! resolved. The only failure a backslash can produce is a truncated escape
//! at end of pattern.

use crate::config::constants::compile_time::scanning::*;
use crate::config::runtime::ScannerPreferences;
use crate::grammar::escapes::{classify_escape, EscapeClass, EscapeKind};
use crate::logging::codes;
use crate::source::PatternSource;
use crate::tokens::{SpannedToken, Token, TokenStream};
use crate::utils::{Position, Span, Spanned};
use crate::{log_debug, log_error, log_success};

/// Scanning errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    #[error("Backslash at end of pattern (offset {offset})")]
    TruncatedEscape { offset: usize },

    #[error("Unclosed character class (opened at offset {offset})")]
    UnclosedClass { offset: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl ScanError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScanError::TruncatedEscape { .. } => codes::scanning::TRUNCATED_ESCAPE,
            ScanError::UnclosedClass { .. } => codes::scanning::UNCLOSED_CLASS,
            ScanError::TooManyTokens { .. } => codes::scanning::TOO_MANY_TOKENS,
        }
    }
}

/// Scan metrics with runtime preferences
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub literal_tokens: usize,
    pub structure_tokens: usize,
    pub quantifier_tokens: usize,
    pub anchor_tokens: usize,
    pub class_count: usize,
    pub comment_count: usize,
    pub whitespace_tokens: usize,

    // Escape accounting (preference-controlled)
    pub escape_sequences: usize,
    pub meaningful_escapes: usize,
    pub redundant_escapes: usize,
}

impl ScanMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &ScannerPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        use crate::tokens::TokenClass;
        match token.token_class() {
            TokenClass::Consuming => self.literal_tokens += 1,
            TokenClass::Structure => {
                self.structure_tokens += 1;
                if matches!(token, Token::OpenClass) {
                    self.class_count += 1;
                }
            }
            TokenClass::Quantifier => self.quantifier_tokens += 1,
            TokenClass::Anchor => self.anchor_tokens += 1,
            TokenClass::Ignorable => match token {
                Token::Comment(_) => self.comment_count += 1,
                _ => self.whitespace_tokens += 1,
            },
            TokenClass::Special => {}
        }
    }

    pub(crate) fn record_escape(&mut self, meaningful: bool, preferences: &ScannerPreferences) {
        if !preferences.track_escape_metrics {
            return;
        }
        self.escape_sequences += 1;
        if meaningful {
            self.meaningful_escapes += 1;
        } else {
            self.redundant_escapes += 1;
        }
    }
}

/// Core pattern scanner with class-context tracking
pub struct PatternScanner {
    metrics: ScanMetrics,
    preferences: ScannerPreferences,
}

impl PatternScanner {
    pub fn new() -> Self {
        Self {
            metrics: ScanMetrics::default(),
            preferences: ScannerPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: ScannerPreferences) -> Self {
        Self {
            metrics: ScanMetrics::default(),
            preferences,
        }
    }

    /// Get current metrics
    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    /// Get current preferences
    pub fn preferences(&self) -> &ScannerPreferences {
        &self.preferences
    }

    /// Scan a pattern source into a token stream
    pub fn scan(&mut self, source: &PatternSource) -> Result<TokenStream, ScanError> {
        self.metrics = ScanMetrics::default();

        let free_spacing = source.flags.free_spacing;
        let chars: Vec<char> = source.text.chars().collect();

        log_debug!("Starting pattern scan",
            "char_count" => chars.len(),
            "byte_len" => source.metadata.byte_len,
            "free_spacing" => free_spacing,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let mut tokens: Vec<SpannedToken> = Vec::new();
        let mut pos = Position::start();
        let mut i = 0usize;

        let mut in_class = false;
        let mut class_just_opened = false;
        let mut class_open_offset = 0usize;

        while i < chars.len() {
            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = ScanError::TooManyTokens {
                    count: tokens.len(),
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = Span::new(pos, pos),
                    "token_count" => tokens.len(),
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let c = chars[i];
            let start = pos;
            let was_just_opened = class_just_opened;
            class_just_opened = false;

            let token = if c == '\\' {
                match chars.get(i + 1) {
                    None => {
                        let error = ScanError::TruncatedEscape { offset: pos.offset };
                        log_error!(error.error_code(),
                            "Backslash with no following character",
                            span = Span::new(pos, pos),
                            "offset" => pos.offset,
                            "in_class" => in_class
                        );
                        return Err(error);
                    }
                    Some(&next) => {
                        let (token, meaningful) = match classify_escape(next, in_class) {
                            EscapeClass::Meaningful(kind) => (
                                match kind {
                                    EscapeKind::Literal(ch) => Token::Literal(ch),
                                    EscapeKind::Control(ch) => Token::Literal(ch),
                                    EscapeKind::Shorthand(k) => Token::Shorthand(k),
                                    EscapeKind::Anchor(a) => Token::Anchor(a),
                                },
                                true,
                            ),
                            // The central contract: unrecognized escapes -
                            // every non-ASCII scalar included - drop the
                            // backslash and keep the literal scalar
                            EscapeClass::Redundant(ch) => (Token::Literal(ch), false),
                        };
                        self.metrics.record_escape(meaningful, &self.preferences);
                        pos = pos.advance('\\').advance(next);
                        i += 2;
                        token
                    }
                }
            } else if in_class {
                pos = pos.advance(c);
                i += 1;
                match c {
                    ']' => {
                        in_class = false;
                        Token::CloseClass
                    }
                    '^' if was_just_opened => Token::ClassNegate,
                    '-' => Token::RangeDash,
                    other => Token::Literal(other),
                }
            } else {
                match c {
                    '{' => match self.try_bounded_quantifier(&chars, i) {
                        Some((token, consumed)) => {
                            for &ch in &chars[i..i + consumed] {
                                pos = pos.advance(ch);
                            }
                            i += consumed;
                            token
                        }
                        None => {
                            // `{` that does not start a well-formed bound is
                            // an ordinary literal
                            pos = pos.advance(c);
                            i += 1;
                            Token::Literal('{')
                        }
                    },
                    '#' if free_spacing => {
                        let mut text = String::new();
                        pos = pos.advance(c);
                        i += 1;
                        while i < chars.len() && chars[i] != '\n' {
                            text.push(chars[i]);
                            pos = pos.advance(chars[i]);
                            i += 1;
                        }
                        Token::Comment(text)
                    }
                    ws if free_spacing && ws.is_whitespace() => {
                        pos = pos.advance(c);
                        i += 1;
                        Token::Whitespace(ws)
                    }
                    _ => {
                        pos = pos.advance(c);
                        i += 1;
                        match c {
                            '.' => Token::Dot,
                            '*' => Token::Star,
                            '+' => Token::Plus,
                            '?' => Token::Question,
                            '|' => Token::Alternation,
                            '(' => Token::OpenGroup,
                            ')' => Token::CloseGroup,
                            '[' => {
                                in_class = true;
                                class_just_opened = true;
                                class_open_offset = start.offset;
                                Token::OpenClass
                            }
                            '^' => Token::Anchor(crate::grammar::escapes::AnchorKind::LineStart),
                            '$' => Token::Anchor(crate::grammar::escapes::AnchorKind::LineEnd),
                            other => Token::Literal(other),
                        }
                    }
                }
            };

            self.metrics.record_token(&token, &self.preferences);
            tokens.push(Spanned::new(token, Span::new(start, pos)));
        }

        if in_class {
            let error = ScanError::UnclosedClass {
                offset: class_open_offset,
            };
            log_error!(error.error_code(), "Character class never closed",
                span = Span::new(pos, pos),
                "open_offset" => class_open_offset
            );
            return Err(error);
        }

        tokens.push(Spanned::new(Token::Eop, Span::new(pos, pos)));

        if self.preferences.log_class_statistics && self.metrics.class_count > 0 {
            log_debug!("Character class statistics",
                "classes" => self.metrics.class_count,
                "escapes" => self.metrics.escape_sequences
            );
        }

        let stream = TokenStream::new(tokens);

        log_success!(codes::success::SCAN_COMPLETE,
            "Pattern scan completed successfully",
            "token_count" => stream.len(),
            "literals" => self.metrics.literal_tokens,
            "classes" => self.metrics.class_count,
            "escapes" => self.metrics.escape_sequences,
            "meaningful_escapes" => self.metrics.meaningful_escapes,
            "redundant_escapes" => self.metrics.redundant_escapes
        );

        Ok(stream)
    }

    /// Try to read `{min}`, `{min,}` or `{min,max}` starting at the `{` in
    /// `chars[open]`. Returns the token and the number of scalars consumed,
    /// or None when the braces do not form a bound.
    fn try_bounded_quantifier(&self, chars: &[char], open: usize) -> Option<(Token, usize)> {
        let mut j = open + 1;

        let mut min_digits = String::new();
        while j < chars.len() && chars[j].is_ascii_digit() {
            min_digits.push(chars[j]);
            j += 1;
        }
        if min_digits.is_empty() {
            return None;
        }
        let min: u32 = min_digits.parse().ok()?;

        match chars.get(j) {
            Some('}') => Some((
                Token::Bounded {
                    min,
                    max: Some(min),
                },
                j - open + 1,
            )),
            Some(',') => {
                j += 1;
                let mut max_digits = String::new();
                while j < chars.len() && chars[j].is_ascii_digit() {
                    max_digits.push(chars[j]);
                    j += 1;
                }
                if chars.get(j) != Some(&'}') {
                    return None;
                }
                let max = if max_digits.is_empty() {
                    None
                } else {
                    Some(max_digits.parse().ok()?)
                };
                Some((Token::Bounded { min, max }, j - open + 1))
            }
            _ => None,
        }
    }
}

impl Default for PatternScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::escapes::{AnchorKind, ClassKind};
    use assert_matches::assert_matches;

    fn scan(pattern: &str) -> Result<Vec<Token>, ScanError> {
        let source = PatternSource::from_raw(pattern).unwrap();
        let mut scanner = PatternScanner::new();
        scanner
            .scan(&source)
            .map(|s| s.iter_significant().map(|t| t.value.clone()).collect())
    }

    fn scan_flags(pattern: &str, flags: crate::source::PatternFlags) -> Vec<Token> {
        let source = PatternSource::from_raw_with_flags(pattern, flags).unwrap();
        let mut scanner = PatternScanner::new();
        scanner
            .scan(&source)
            .unwrap()
            .iter_significant()
            .map(|t| t.value.clone())
            .collect()
    }

    #[test]
    fn test_plain_literals() {
        assert_eq!(
            scan("ab").unwrap(),
            vec![Token::Literal('a'), Token::Literal('b'), Token::Eop]
        );
    }

    #[test]
    fn test_metacharacters() {
        assert_eq!(
            scan("a.*").unwrap(),
            vec![Token::Literal('a'), Token::Dot, Token::Star, Token::Eop]
        );
    }

    #[test]
    fn test_redundant_escape_of_multibyte_scalar() {
        // `\§` scans to the same tokens as `§` - no error anywhere
        assert_eq!(scan("\\§").unwrap(), scan("§").unwrap());
        assert_eq!(
            scan("\\§").unwrap(),
            vec![Token::Literal('§'), Token::Eop]
        );
    }

    #[test]
    fn test_redundant_escape_inside_class() {
        // The regression case: `[\§]` must scan cleanly and identically
        // to `[§]`
        assert_eq!(scan("[\\§]").unwrap(), scan("[§]").unwrap());
        assert_eq!(
            scan("[\\§]").unwrap(),
            vec![
                Token::OpenClass,
                Token::Literal('§'),
                Token::CloseClass,
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_meaningful_escapes() {
        assert_eq!(
            scan("\\d\\b").unwrap(),
            vec![
                Token::Shorthand(ClassKind::Digit),
                Token::Anchor(AnchorKind::WordBoundary),
                Token::Eop
            ]
        );
        // Escaped dot is a literal dot, not Dot
        assert_eq!(
            scan("\\.").unwrap(),
            vec![Token::Literal('.'), Token::Eop]
        );
        // Control escape resolves to its scalar
        assert_eq!(
            scan("\\n").unwrap(),
            vec![Token::Literal('\n'), Token::Eop]
        );
    }

    #[test]
    fn test_backspace_inside_class() {
        assert_eq!(
            scan("[\\b]").unwrap(),
            vec![
                Token::OpenClass,
                Token::Literal('\u{0008}'),
                Token::CloseClass,
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_truncated_escape() {
        assert_matches!(scan("abc\\"), Err(ScanError::TruncatedEscape { offset: 3 }));
        // Also inside a class
        assert_matches!(scan("[ab\\"), Err(ScanError::TruncatedEscape { offset: 3 }));
    }

    #[test]
    fn test_unclosed_class() {
        assert_matches!(scan("a[bc"), Err(ScanError::UnclosedClass { offset: 1 }));
    }

    #[test]
    fn test_class_tokens() {
        assert_eq!(
            scan("[^a-z]").unwrap(),
            vec![
                Token::OpenClass,
                Token::ClassNegate,
                Token::Literal('a'),
                Token::RangeDash,
                Token::Literal('z'),
                Token::CloseClass,
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_caret_literal_when_not_first_in_class() {
        assert_eq!(
            scan("[a^]").unwrap(),
            vec![
                Token::OpenClass,
                Token::Literal('a'),
                Token::Literal('^'),
                Token::CloseClass,
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_escaped_close_bracket_stays_in_class() {
        assert_eq!(
            scan("[\\]]").unwrap(),
            vec![
                Token::OpenClass,
                Token::Literal(']'),
                Token::CloseClass,
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_bounded_quantifiers() {
        assert_eq!(
            scan("a{2,5}").unwrap(),
            vec![
                Token::Literal('a'),
                Token::Bounded {
                    min: 2,
                    max: Some(5)
                },
                Token::Eop
            ]
        );
        assert_eq!(
            scan("a{3}").unwrap(),
            vec![
                Token::Literal('a'),
                Token::Bounded {
                    min: 3,
                    max: Some(3)
                },
                Token::Eop
            ]
        );
        assert_eq!(
            scan("a{2,}").unwrap(),
            vec![
                Token::Literal('a'),
                Token::Bounded { min: 2, max: None },
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_malformed_bound_is_literal_brace() {
        assert_eq!(
            scan("a{x}").unwrap(),
            vec![
                Token::Literal('a'),
                Token::Literal('{'),
                Token::Literal('x'),
                Token::Literal('}'),
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_anchors() {
        assert_eq!(
            scan("^a$").unwrap(),
            vec![
                Token::Anchor(AnchorKind::LineStart),
                Token::Literal('a'),
                Token::Anchor(AnchorKind::LineEnd),
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_free_spacing_filters_whitespace_and_comments() {
        let flags = crate::source::PatternFlags {
            free_spacing: true,
            ignore_case: false,
        };
        let tokens = scan_flags("a b # trailing note", flags);
        // Whitespace and comment are scanned but not significant
        assert_eq!(
            tokens,
            vec![Token::Literal('a'), Token::Literal('b'), Token::Eop]
        );
    }

    #[test]
    fn test_free_spacing_escaped_space_is_literal() {
        let flags = crate::source::PatternFlags {
            free_spacing: true,
            ignore_case: false,
        };
        let tokens = scan_flags("a\\ b", flags);
        assert_eq!(
            tokens,
            vec![
                Token::Literal('a'),
                Token::Literal(' '),
                Token::Literal('b'),
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_whitespace_significant_without_free_spacing() {
        assert_eq!(
            scan("a b").unwrap(),
            vec![
                Token::Literal('a'),
                Token::Literal(' '),
                Token::Literal('b'),
                Token::Eop
            ]
        );
    }

    #[test]
    fn test_escape_metrics() {
        let source = PatternSource::from_raw("\\d\\§\\.").unwrap();
        let mut scanner = PatternScanner::new();
        scanner.scan(&source).unwrap();

        let metrics = scanner.metrics();
        assert_eq!(metrics.escape_sequences, 3);
        assert_eq!(metrics.meaningful_escapes, 2);
        assert_eq!(metrics.redundant_escapes, 1);
    }

    #[test]
    fn test_every_nonascii_escape_scans() {
        for c in ['§', '€', '漢', '🦀', 'ß', 'Ω'] {
            let pattern = format!("\\{}", c);
            let tokens = scan(&pattern).unwrap();
            assert_eq!(tokens, vec![Token::Literal(c), Token::Eop]);
        }
    }
}
