//! Error types for token-to-AST transformation
//!
//! Span-accurate parse errors with diagnostic-code mapping into the global
//! logging system.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Syntax transformation errors with diagnostic-code mapping
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Unexpected end of pattern: expected {expected}")]
    UnexpectedEndOfPattern { expected: String },

    #[error("Empty token stream - no tokens to parse")]
    EmptyTokenStream,

    #[error("Missing end-of-pattern token in token stream")]
    MissingEop,

    #[error("Unbalanced group delimiter at {span}")]
    UnbalancedGroup { span: Span },

    #[error("Quantifier with nothing to repeat at {span}")]
    DanglingQuantifier { span: Span },

    #[error("Invalid class range '{lo}-{hi}' at {span}")]
    InvalidClassRange { lo: char, hi: char, span: Span },

    #[error("Empty character class at {span}")]
    EmptyClass { span: Span },

    #[error("Maximum group nesting depth exceeded at {span}")]
    MaxGroupDepth { span: Span },

    #[error("Internal parser error: {message}")]
    InternalParserError { message: String },
}

impl SyntaxError {
    /// Create unexpected token error
    pub fn unexpected_token(expected: &str, found: &str, span: Span) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            span,
        }
    }

    /// Create unexpected end of pattern error
    pub fn unexpected_end_of_pattern(expected: &str) -> Self {
        Self::UnexpectedEndOfPattern {
            expected: expected.to_string(),
        }
    }

    /// Create internal parser error
    pub fn internal_parser_error(message: &str) -> Self {
        Self::InternalParserError {
            message: message.to_string(),
        }
    }

    /// Get diagnostic code for the global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfPattern { .. } => codes::syntax::MISSING_EOP,
            Self::EmptyTokenStream => codes::syntax::EMPTY_TOKEN_STREAM,
            Self::MissingEop => codes::syntax::MISSING_EOP,
            Self::UnbalancedGroup { .. } => codes::syntax::UNBALANCED_GROUP,
            Self::DanglingQuantifier { .. } => codes::syntax::DANGLING_QUANTIFIER,
            Self::InvalidClassRange { .. } => codes::syntax::INVALID_CLASS_RANGE,
            Self::EmptyClass { .. } => codes::syntax::EMPTY_CLASS,
            Self::MaxGroupDepth { .. } => codes::syntax::MAX_GROUP_DEPTH,
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::UnbalancedGroup { span }
            | Self::DanglingQuantifier { span }
            | Self::InvalidClassRange { span, .. }
            | Self::EmptyClass { span }
            | Self::MaxGroupDepth { span } => Some(*span),
            Self::UnexpectedEndOfPattern { .. }
            | Self::EmptyTokenStream
            | Self::MissingEop
            | Self::InternalParserError { .. } => None,
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        matches!(
            self,
            Self::InternalParserError { .. } | Self::MaxGroupDepth { .. }
        )
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        !self.requires_halt()
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        crate::logging::codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get recommended action
    pub fn recommended_action(&self) -> &'static str {
        crate::logging::codes::get_action(self.error_code().as_str())
    }
}

impl From<crate::tokens::TokenStreamError> for SyntaxError {
    fn from(error: crate::tokens::TokenStreamError) -> Self {
        match error {
            crate::tokens::TokenStreamError::UnexpectedToken {
                expected,
                found,
                span,
            } => Self::UnexpectedToken {
                expected,
                found,
                span,
            },
            crate::tokens::TokenStreamError::UnexpectedEndOfStream { expected } => {
                Self::UnexpectedEndOfPattern { expected }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Position, Span};

    #[test]
    fn test_error_code_mapping() {
        let span = Span::new(Position::start(), Position::start());

        assert_eq!(
            SyntaxError::unexpected_token("atom", ")", span)
                .error_code()
                .as_str(),
            "E050"
        );
        assert_eq!(SyntaxError::MissingEop.error_code().as_str(), "E040");
        assert_eq!(
            SyntaxError::UnbalancedGroup { span }.error_code().as_str(),
            "E042"
        );
        assert_eq!(
            SyntaxError::MaxGroupDepth { span }.error_code().as_str(),
            "E087"
        );
    }

    #[test]
    fn test_error_properties() {
        let span = Span::new(Position::start(), Position::start());

        let internal = SyntaxError::internal_parser_error("oops");
        assert!(internal.requires_halt());
        assert!(!internal.is_recoverable());

        let dangling = SyntaxError::DanglingQuantifier { span };
        assert!(!dangling.requires_halt());
        assert!(dangling.is_recoverable());
    }

    #[test]
    fn test_span_extraction() {
        let span = Span::new(Position::new(2, 1, 3), Position::new(5, 1, 6));
        let error = SyntaxError::InvalidClassRange {
            lo: 'z',
            hi: 'a',
            span,
        };

        assert_eq!(error.span(), Some(span));
        assert!(SyntaxError::EmptyTokenStream.span().is_none());
    }

    #[test]
    fn test_stream_error_conversion() {
        let err: SyntaxError = crate::tokens::TokenStreamError::UnexpectedEndOfStream {
            expected: ")".to_string(),
        }
        .into();
        assert!(matches!(err, SyntaxError::UnexpectedEndOfPattern { .. }));
    }
}
