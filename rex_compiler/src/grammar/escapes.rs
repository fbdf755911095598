//! Escape classification - the enumerated meaningful-escape vocabulary
//!
//! A backslash in a pattern either forms a recognized escape sequence or it
//! is redundant. The recognized set is a fixed enumeration in this module;
//! everything outside it - every non-ASCII scalar value included - classifies
//! as `Redundant` and compiles to the bare literal. Classification is a pure
//! function of the following scalar value and the class-context flag; it
//! never inspects encoded bytes and it never fails.
//!
//! The one failure a backslash can produce is a truncated escape (backslash
//! as the final scalar of the pattern); that is a scanner error, not a
//! classification outcome.

use serde::{Deserialize, Serialize};

/// Shorthand character classes reachable through escapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    /// `\d` - ASCII digits
    Digit,
    /// `\D` - everything except ASCII digits
    NotDigit,
    /// `\w` - word characters [0-9A-Z_a-z]
    Word,
    /// `\W` - everything except word characters
    NotWord,
    /// `\s` - whitespace [\t\n\v\f\r ]
    Space,
    /// `\S` - everything except whitespace
    NotSpace,
}

impl ClassKind {
    /// The escape letter that produces this shorthand
    pub const fn letter(self) -> char {
        match self {
            Self::Digit => 'd',
            Self::NotDigit => 'D',
            Self::Word => 'w',
            Self::NotWord => 'W',
            Self::Space => 's',
            Self::NotSpace => 'S',
        }
    }

    /// Whether this shorthand is the complement of its base spans
    pub const fn is_negated(self) -> bool {
        matches!(self, Self::NotDigit | Self::NotWord | Self::NotSpace)
    }

    /// Base (positive) scalar spans; negated kinds are inverted downstream
    pub const fn base_spans(self) -> &'static [(char, char)] {
        match self {
            Self::Digit | Self::NotDigit => &[('0', '9')],
            Self::Word | Self::NotWord => &[('0', '9'), ('A', 'Z'), ('_', '_'), ('a', 'z')],
            // \t \n \v \f \r are the contiguous run U+0009..U+000D
            Self::Space | Self::NotSpace => &[('\t', '\r'), (' ', ' ')],
        }
    }
}

/// Zero-width assertions reachable through escapes or bare metacharacters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorKind {
    /// `^` - start of line
    LineStart,
    /// `$` - end of line
    LineEnd,
    /// `\b` - word boundary (outside a character class)
    WordBoundary,
    /// `\B` - not a word boundary
    NotWordBoundary,
    /// `\A` - start of pattern subject
    SubjectStart,
    /// `\z` - end of pattern subject
    SubjectEnd,
}

impl AnchorKind {
    /// Source representation of this anchor
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineStart => "^",
            Self::LineEnd => "$",
            Self::WordBoundary => "\\b",
            Self::NotWordBoundary => "\\B",
            Self::SubjectStart => "\\A",
            Self::SubjectEnd => "\\z",
        }
    }
}

/// What a recognized escape means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscapeKind {
    /// Escaped metacharacter; matches that character literally
    Literal(char),
    /// Control escape, carrying the resolved scalar (`\n` -> U+000A)
    Control(char),
    /// Class shorthand (`\d`, `\W`, ...)
    Shorthand(ClassKind),
    /// Zero-width assertion (`\b`, `\A`, ...)
    Anchor(AnchorKind),
}

/// Classification result for one backslash-plus-scalar pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeClass {
    /// Recognized escape sequence
    Meaningful(EscapeKind),
    /// The backslash is a no-op; the scalar is emitted unchanged
    Redundant(char),
}

/// Metacharacters whose escape is meaningful outside a character class
const META_OUTSIDE: &[char] = &[
    '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|', '^', '$', '\\', '/',
];

/// Metacharacters whose escape is meaningful inside a character class
const META_INSIDE: &[char] = &[']', '^', '-', '[', '\\', '/'];

/// Classify the scalar value following a backslash.
///
/// Total over all valid scalar values: anything outside the enumerated
/// meaningful set - in particular every non-ASCII scalar - is `Redundant`,
/// never an error.
pub fn classify_escape(c: char, in_class: bool) -> EscapeClass {
    // Control escapes resolve the same way in both contexts
    if let Some(resolved) = control_escape(c) {
        return EscapeClass::Meaningful(EscapeKind::Control(resolved));
    }

    if let Some(kind) = shorthand_escape(c) {
        return EscapeClass::Meaningful(EscapeKind::Shorthand(kind));
    }

    if in_class {
        // \b is backspace inside a class, a word boundary outside
        if c == 'b' {
            return EscapeClass::Meaningful(EscapeKind::Control('\u{0008}'));
        }
        if META_INSIDE.contains(&c) {
            return EscapeClass::Meaningful(EscapeKind::Literal(c));
        }
    } else {
        if let Some(anchor) = anchor_escape(c) {
            return EscapeClass::Meaningful(EscapeKind::Anchor(anchor));
        }
        if META_OUTSIDE.contains(&c) {
            return EscapeClass::Meaningful(EscapeKind::Literal(c));
        }
    }

    EscapeClass::Redundant(c)
}

/// Control escapes and their resolved scalar values
fn control_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'f' => Some('\u{000C}'),
        'v' => Some('\u{000B}'),
        'a' => Some('\u{0007}'),
        'e' => Some('\u{001B}'),
        '0' => Some('\u{0000}'),
        _ => None,
    }
}

/// Class shorthand escapes
fn shorthand_escape(c: char) -> Option<ClassKind> {
    match c {
        'd' => Some(ClassKind::Digit),
        'D' => Some(ClassKind::NotDigit),
        'w' => Some(ClassKind::Word),
        'W' => Some(ClassKind::NotWord),
        's' => Some(ClassKind::Space),
        'S' => Some(ClassKind::NotSpace),
        _ => None,
    }
}

/// Anchor escapes (only recognized outside a character class)
fn anchor_escape(c: char) -> Option<AnchorKind> {
    match c {
        'b' => Some(AnchorKind::WordBoundary),
        'B' => Some(AnchorKind::NotWordBoundary),
        'A' => Some(AnchorKind::SubjectStart),
        'z' => Some(AnchorKind::SubjectEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_metacharacters_meaningful_outside() {
        for &c in META_OUTSIDE {
            assert_matches!(
                classify_escape(c, false),
                EscapeClass::Meaningful(EscapeKind::Literal(got)) if got == c
            );
        }
    }

    #[test]
    fn test_class_metacharacters_meaningful_inside() {
        for &c in META_INSIDE {
            assert_matches!(
                classify_escape(c, true),
                EscapeClass::Meaningful(EscapeKind::Literal(got)) if got == c
            );
        }
    }

    #[test]
    fn test_dot_redundant_inside_class() {
        // '.' has no special meaning inside a class, so escaping it there
        // is a no-op
        assert_eq!(classify_escape('.', true), EscapeClass::Redundant('.'));
        assert_matches!(
            classify_escape('.', false),
            EscapeClass::Meaningful(EscapeKind::Literal('.'))
        );
    }

    #[test]
    fn test_shorthands_in_both_contexts() {
        for (letter, kind) in [
            ('d', ClassKind::Digit),
            ('D', ClassKind::NotDigit),
            ('w', ClassKind::Word),
            ('W', ClassKind::NotWord),
            ('s', ClassKind::Space),
            ('S', ClassKind::NotSpace),
        ] {
            for in_class in [false, true] {
                assert_eq!(
                    classify_escape(letter, in_class),
                    EscapeClass::Meaningful(EscapeKind::Shorthand(kind))
                );
            }
        }
    }

    #[test]
    fn test_word_boundary_versus_backspace() {
        assert_eq!(
            classify_escape('b', false),
            EscapeClass::Meaningful(EscapeKind::Anchor(AnchorKind::WordBoundary))
        );
        assert_eq!(
            classify_escape('b', true),
            EscapeClass::Meaningful(EscapeKind::Control('\u{0008}'))
        );
    }

    #[test]
    fn test_control_escapes_resolve() {
        assert_eq!(
            classify_escape('n', false),
            EscapeClass::Meaningful(EscapeKind::Control('\n'))
        );
        assert_eq!(
            classify_escape('t', true),
            EscapeClass::Meaningful(EscapeKind::Control('\t'))
        );
        assert_eq!(
            classify_escape('e', false),
            EscapeClass::Meaningful(EscapeKind::Control('\u{001B}'))
        );
    }

    #[test]
    fn test_non_ascii_scalars_are_redundant() {
        // The regression at the heart of this crate: a multi-byte scalar
        // after a backslash is a redundant escape, never an error.
        for c in ['§', '€', '漢', '🦀', '\u{00A7}', '\u{FFFD}'] {
            assert_eq!(classify_escape(c, false), EscapeClass::Redundant(c));
            assert_eq!(classify_escape(c, true), EscapeClass::Redundant(c));
        }
    }

    #[test]
    fn test_unlisted_ascii_redundant() {
        assert_eq!(classify_escape('q', false), EscapeClass::Redundant('q'));
        assert_eq!(classify_escape('Z', false), EscapeClass::Redundant('Z'));
        assert_eq!(classify_escape('9', false), EscapeClass::Redundant('9'));
        // Anchors are only anchors outside a class
        assert_eq!(classify_escape('A', true), EscapeClass::Redundant('A'));
        assert_eq!(classify_escape('z', true), EscapeClass::Redundant('z'));
    }

    #[test]
    fn test_classification_is_total() {
        // Sweep the entire BMP plus a supplementary block; classification
        // must produce a value for every scalar without panicking.
        for cp in (0u32..=0xFFFF).chain(0x1F300..=0x1F3FF) {
            if let Some(c) = char::from_u32(cp) {
                let _ = classify_escape(c, false);
                let _ = classify_escape(c, true);
            }
        }
    }

    #[test]
    fn test_shorthand_base_spans_sorted() {
        for kind in [ClassKind::Digit, ClassKind::Word, ClassKind::Space] {
            let spans = kind.base_spans();
            for window in spans.windows(2) {
                assert!(window[0].1 < window[1].0, "spans must be sorted disjoint");
            }
        }
    }
}
