//! Pattern source reader with literal-form and flag handling

use crate::config::constants::compile_time::scanning::MAX_PATTERN_BYTES;
use crate::logging::codes;
use serde::{Deserialize, Serialize};

/// Flags accepted on a delimited pattern literal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    /// `x` - unescaped whitespace and `#` comments outside classes are
    /// ignored
    pub free_spacing: bool,
    /// `i` - ASCII case-insensitive matching
    pub ignore_case: bool,
}

impl PatternFlags {
    /// Decode a flag string (the characters after the closing delimiter)
    pub fn from_letters(letters: &str) -> Result<Self, SourceError> {
        let mut flags = Self::default();
        for c in letters.chars() {
            match c {
                'x' => flags.free_spacing = true,
                'i' => flags.ignore_case = true,
                other => return Err(SourceError::UnknownFlag { flag: other }),
            }
        }
        Ok(flags)
    }
}

/// Metadata about an accepted pattern source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Byte length of the pattern text (without delimiters)
    pub byte_len: usize,
    /// Scalar-value count of the pattern text
    pub char_count: usize,
    /// Whether the input arrived in `/.../ flags` literal form
    pub delimited: bool,
}

/// A validated pattern ready for scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSource {
    /// The pattern text between delimiters (or the raw input)
    pub text: String,
    pub flags: PatternFlags,
    pub metadata: SourceMetadata,
}

/// Pattern intake errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Pattern text is empty")]
    EmptyPattern,

    #[error("Pattern too large: {size} bytes (max {MAX_PATTERN_BYTES})")]
    PatternTooLarge { size: usize },

    #[error("Unterminated pattern literal (missing closing '/')")]
    UnterminatedLiteral,

    #[error("Unknown flag '{flag}' on pattern literal")]
    UnknownFlag { flag: char },
}

impl SourceError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SourceError::EmptyPattern => codes::source::EMPTY_PATTERN,
            SourceError::PatternTooLarge { .. } => codes::source::PATTERN_TOO_LARGE,
            SourceError::UnterminatedLiteral => codes::source::UNTERMINATED_LITERAL,
            SourceError::UnknownFlag { .. } => codes::source::UNKNOWN_FLAG,
        }
    }
}

impl PatternSource {
    /// Parse pattern input. Input starting with `/` is treated as a
    /// delimited literal with optional trailing flags; anything else is raw
    /// pattern text with default flags.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        if input.starts_with('/') {
            Self::from_literal(input)
        } else {
            Self::from_raw(input)
        }
    }

    /// Accept raw pattern text with default flags
    pub fn from_raw(text: &str) -> Result<Self, SourceError> {
        Self::build(text.to_string(), PatternFlags::default(), false)
    }

    /// Accept raw pattern text with explicit flags
    pub fn from_raw_with_flags(text: &str, flags: PatternFlags) -> Result<Self, SourceError> {
        Self::build(text.to_string(), flags, false)
    }

    /// Accept the delimited literal form `/pattern/flags`. A `\/` inside the
    /// pattern does not terminate it; the backslash is preserved for the
    /// scanner to classify.
    pub fn from_literal(literal: &str) -> Result<Self, SourceError> {
        let mut chars = literal.char_indices();
        match chars.next() {
            Some((_, '/')) => {}
            _ => return Err(SourceError::UnterminatedLiteral),
        }

        let mut escaped = false;
        let mut close = None;
        for (offset, c) in chars {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '/' => {
                    close = Some(offset);
                    break;
                }
                _ => {}
            }
        }

        let close = close.ok_or(SourceError::UnterminatedLiteral)?;
        let text = literal[1..close].to_string();
        let flags = PatternFlags::from_letters(&literal[close + 1..])?;

        Self::build(text, flags, true)
    }

    fn build(text: String, flags: PatternFlags, delimited: bool) -> Result<Self, SourceError> {
        if text.is_empty() {
            return Err(SourceError::EmptyPattern);
        }

        // SECURITY: bound pattern size before any further processing
        if text.len() > MAX_PATTERN_BYTES {
            return Err(SourceError::PatternTooLarge { size: text.len() });
        }

        let metadata = SourceMetadata {
            byte_len: text.len(),
            char_count: text.chars().count(),
            delimited,
        };

        Ok(Self {
            text,
            flags,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_raw_intake() {
        let source = PatternSource::from_raw("[a-z]+").unwrap();
        assert_eq!(source.text, "[a-z]+");
        assert!(!source.flags.free_spacing);
        assert!(!source.metadata.delimited);
        assert_eq!(source.metadata.char_count, 6);
    }

    #[test]
    fn test_literal_intake() {
        let source = PatternSource::from_literal("/[\\§]/").unwrap();
        assert_eq!(source.text, "[\\§]");
        assert!(source.metadata.delimited);
        // Section sign is two bytes; pattern is [ \ § ]
        assert_eq!(source.metadata.byte_len, 5);
        assert_eq!(source.metadata.char_count, 4);
    }

    #[test]
    fn test_literal_flags() {
        let source = PatternSource::from_literal("/a b/x").unwrap();
        assert!(source.flags.free_spacing);
        assert!(!source.flags.ignore_case);

        let source = PatternSource::from_literal("/ab/xi").unwrap();
        assert!(source.flags.free_spacing);
        assert!(source.flags.ignore_case);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert_matches!(
            PatternSource::from_literal("/ab/q"),
            Err(SourceError::UnknownFlag { flag: 'q' })
        );
    }

    #[test]
    fn test_escaped_slash_does_not_terminate() {
        let source = PatternSource::from_literal("/a\\/b/").unwrap();
        assert_eq!(source.text, "a\\/b");
    }

    #[test]
    fn test_unterminated_literal() {
        assert_matches!(
            PatternSource::from_literal("/abc"),
            Err(SourceError::UnterminatedLiteral)
        );
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_matches!(PatternSource::from_raw(""), Err(SourceError::EmptyPattern));
        assert_matches!(
            PatternSource::from_literal("//"),
            Err(SourceError::EmptyPattern)
        );
    }

    #[test]
    fn test_parse_dispatch() {
        assert!(PatternSource::parse("abc").unwrap().text == "abc");
        assert!(PatternSource::parse("/abc/i").unwrap().flags.ignore_case);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SourceError::EmptyPattern.error_code().as_str(), "E005");
        assert_eq!(
            SourceError::UnterminatedLiteral.error_code().as_str(),
            "E007"
        );
    }
}
