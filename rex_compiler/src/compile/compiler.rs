//! AST lowering into the canonical compiled form
//!
//! Every consuming atom normalizes to a [`CharSet`]; classes union their
//! members before negation; quantifiers validate against compile-time
//! bounds. Canonicalization is what guarantees that `[\§]` and `[§]`
//! produce identical programs while `\d` and `d` do not.

use crate::compile::charset::CharSet;
use crate::compile::program::{CompiledPattern, Matcher, Step};
use crate::config::constants::compile_time::compiling::*;
use crate::config::runtime::CompilePreferences;
use crate::grammar::ast::nodes::{Atom, ClassItem, PatternAst, Piece};
use crate::grammar::escapes::ClassKind;
use crate::logging::codes;
use crate::source::PatternFlags;
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};

/// Compilation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("Quantifier minimum {min} exceeds maximum {max} at {span}")]
    QuantifierRange { min: u32, max: u32, span: Span },

    #[error("Quantifier bound {bound} exceeds maximum {MAX_QUANTIFIER_BOUND} at {span}")]
    QuantifierTooLarge { bound: u32, span: Span },

    #[error("Class matches no scalar value at {span}")]
    UnmatchableClass { span: Span },

    #[error("Compiled program too large: {spans} spans (max {MAX_PROGRAM_SPANS})")]
    ProgramTooLarge { spans: usize },

    #[error("Too many alternation branches: {branches} (max {MAX_ALTERNATION_BRANCHES})")]
    TooManyBranches { branches: usize },
}

impl CompileError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            CompileError::QuantifierRange { .. } => codes::compiling::QUANTIFIER_RANGE,
            CompileError::QuantifierTooLarge { .. } => codes::compiling::QUANTIFIER_TOO_LARGE,
            CompileError::UnmatchableClass { .. } => codes::compiling::UNMATCHABLE_CLASS,
            CompileError::ProgramTooLarge { .. } => codes::compiling::PROGRAM_TOO_LARGE,
            CompileError::TooManyBranches { .. } => codes::compiling::PROGRAM_TOO_LARGE,
        }
    }

    /// Get span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::QuantifierRange { span, .. }
            | CompileError::QuantifierTooLarge { span, .. }
            | CompileError::UnmatchableClass { span } => Some(*span),
            CompileError::ProgramTooLarge { .. } | CompileError::TooManyBranches { .. } => None,
        }
    }
}

/// Pattern compiler (AST -> canonical program)
pub struct PatternCompiler {
    preferences: CompilePreferences,
}

impl PatternCompiler {
    pub fn new() -> Self {
        Self {
            preferences: CompilePreferences::default(),
        }
    }

    pub fn with_preferences(preferences: CompilePreferences) -> Self {
        Self { preferences }
    }

    /// Lower a parsed pattern into its canonical compiled form
    pub fn compile(
        &self,
        ast: &PatternAst,
        flags: PatternFlags,
    ) -> Result<CompiledPattern, CompileError> {
        log_debug!("Starting pattern lowering",
            "branches" => ast.branches.len(),
            "atoms" => ast.atom_count(),
            "ignore_case" => flags.ignore_case
        );

        let program = self.lower_ast(ast, flags.ignore_case)?;

        let branches = program.branch_count();
        if branches > MAX_ALTERNATION_BRANCHES {
            let error = CompileError::TooManyBranches { branches };
            log_error!(error.error_code(), "Alternation branch limit exceeded",
                "branches" => branches,
                "limit" => MAX_ALTERNATION_BRANCHES
            );
            return Err(error);
        }

        let spans = program.span_count();
        if spans > MAX_PROGRAM_SPANS {
            let error = CompileError::ProgramTooLarge { spans };
            log_error!(error.error_code(), "Program span limit exceeded",
                "spans" => spans,
                "limit" => MAX_PROGRAM_SPANS
            );
            return Err(error);
        }

        if self.preferences.log_canonicalization_details {
            log_debug!("Canonicalization complete",
                "steps" => program.step_count(),
                "spans" => spans
            );
        }

        log_success!(codes::success::COMPILE_COMPLETE,
            "Pattern lowering completed successfully",
            "branches" => program.branches.len(),
            "steps" => program.step_count(),
            "spans" => spans
        );

        Ok(program)
    }

    fn lower_ast(&self, ast: &PatternAst, ignore_case: bool) -> Result<CompiledPattern, CompileError> {
        let mut branches = Vec::with_capacity(ast.branches.len());

        for branch in &ast.branches {
            let mut steps = Vec::with_capacity(branch.pieces.len());
            for piece in &branch.pieces {
                steps.push(self.lower_piece(piece, ignore_case)?);
            }
            branches.push(steps);
        }

        Ok(CompiledPattern {
            branches,
            ignore_case,
        })
    }

    fn lower_piece(&self, piece: &Piece, ignore_case: bool) -> Result<Step, CompileError> {
        let quantifier = piece.quantifier;

        if let Some(max) = quantifier.max {
            if quantifier.min > max {
                return Err(CompileError::QuantifierRange {
                    min: quantifier.min,
                    max,
                    span: piece.span,
                });
            }
            if max > MAX_QUANTIFIER_BOUND {
                return Err(CompileError::QuantifierTooLarge {
                    bound: max,
                    span: piece.span,
                });
            }
        } else if quantifier.min > MAX_QUANTIFIER_BOUND {
            return Err(CompileError::QuantifierTooLarge {
                bound: quantifier.min,
                span: piece.span,
            });
        }

        let matcher = match &piece.atom {
            Atom::Literal(c) => Matcher::Set(self.literal_set(*c, ignore_case)),
            Atom::Dot => Matcher::Set(dot_set()),
            Atom::Shorthand(kind) => Matcher::Set(shorthand_set(*kind)),
            Atom::Anchor(kind) => Matcher::Assert(*kind),
            Atom::Class(class) => {
                let mut set = CharSet::empty();
                for item in &class.items {
                    let member = match item {
                        ClassItem::Single(c) => self.literal_set(*c, ignore_case),
                        ClassItem::Range(lo, hi) => {
                            let range = CharSet::range(*lo, *hi);
                            if ignore_case {
                                range.folded_ascii_case()
                            } else {
                                range
                            }
                        }
                        ClassItem::Shorthand(kind) => shorthand_set(*kind),
                    };
                    set = set.union(&member);
                }

                if class.negated {
                    set = set.inverted();
                }

                if set.is_empty() {
                    return Err(CompileError::UnmatchableClass { span: class.span });
                }

                Matcher::Set(set)
            }
            Atom::Group(inner) => Matcher::Sub(self.lower_ast(inner, ignore_case)?),
        };

        Ok(Step {
            matcher,
            min: quantifier.min,
            max: quantifier.max,
        })
    }

    fn literal_set(&self, c: char, ignore_case: bool) -> CharSet {
        let set = CharSet::single(c);
        if ignore_case {
            set.folded_ascii_case()
        } else {
            set
        }
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// `.` matches any scalar except newline
fn dot_set() -> CharSet {
    CharSet::single('\n').inverted()
}

/// Expand a shorthand to its normalized set (negated kinds invert)
fn shorthand_set(kind: ClassKind) -> CharSet {
    let base = CharSet::from_base_spans(kind.base_spans());
    if kind.is_negated() {
        base.inverted()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::scan_pattern;
    use crate::source::PatternSource;
    use crate::syntax::parse_tokens;
    use assert_matches::assert_matches;

    fn compile(pattern: &str) -> Result<CompiledPattern, CompileError> {
        compile_with_flags(pattern, PatternFlags::default())
    }

    fn compile_with_flags(
        pattern: &str,
        flags: PatternFlags,
    ) -> Result<CompiledPattern, CompileError> {
        let source = PatternSource::from_raw_with_flags(pattern, flags).unwrap();
        let stream = scan_pattern(&source).expect("scan failed");
        let ast = parse_tokens(stream).expect("parse failed");
        PatternCompiler::new().compile(&ast, flags)
    }

    #[test]
    fn test_redundant_class_escape_compiles_equal() {
        // The regression this crate exists for
        let escaped = compile("[\\§]").unwrap();
        let bare = compile("[§]").unwrap();
        assert!(escaped.is_equivalent(&bare));
    }

    #[test]
    fn test_redundant_escape_outside_class_compiles_equal() {
        let escaped = compile("\\§").unwrap();
        let bare = compile("§").unwrap();
        assert!(escaped.is_equivalent(&bare));
    }

    #[test]
    fn test_shorthand_differs_from_bare_letter() {
        // `\d` must NOT be equivalent to `d`
        let shorthand = compile("\\d").unwrap();
        let letter = compile("d").unwrap();
        assert!(!shorthand.is_equivalent(&letter));
    }

    #[test]
    fn test_singleton_class_equals_literal() {
        // Canonical form erases the brackets around a one-member class
        let class = compile("[a]").unwrap();
        let literal = compile("a").unwrap();
        assert!(class.is_equivalent(&literal));
    }

    #[test]
    fn test_class_union_canonicalizes() {
        // [a-cb-e] and [a-e] denote the same set
        let overlapping = compile("[a-cb-e]").unwrap();
        let merged = compile("[a-e]").unwrap();
        assert!(overlapping.is_equivalent(&merged));
    }

    #[test]
    fn test_dot_equals_negated_newline_class() {
        let dot = compile(".").unwrap();
        let negated = compile("[^\\n]").unwrap();
        assert!(dot.is_equivalent(&negated));
    }

    #[test]
    fn test_negated_class() {
        let program = compile("[^0-9]").unwrap();
        match &program.branches[0][0].matcher {
            Matcher::Set(set) => {
                assert!(!set.contains('5'));
                assert!(set.contains('a'));
                assert!(set.contains('§'));
            }
            other => panic!("expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_negated_class_equals_shorthand() {
        // [^0-9] and \D are the same set
        let negated = compile("[^0-9]").unwrap();
        let shorthand = compile("\\D").unwrap();
        assert!(negated.is_equivalent(&shorthand));
    }

    #[test]
    fn test_unmatchable_class() {
        // Digits union non-digits is everything; negated, nothing remains
        assert_matches!(
            compile("[^\\d\\D]"),
            Err(CompileError::UnmatchableClass { .. })
        );
    }

    #[test]
    fn test_quantifier_validation() {
        assert_matches!(
            compile("a{5,2}"),
            Err(CompileError::QuantifierRange { min: 5, max: 2, .. })
        );
        assert_matches!(
            compile("a{0,100000}"),
            Err(CompileError::QuantifierTooLarge { .. })
        );
        assert_matches!(
            compile("a{100000,}"),
            Err(CompileError::QuantifierTooLarge { .. })
        );
        assert!(compile("a{2,5}").is_ok());
    }

    #[test]
    fn test_ignore_case_folding() {
        let flags = PatternFlags {
            free_spacing: false,
            ignore_case: true,
        };
        let program = compile_with_flags("a", flags).unwrap();
        match &program.branches[0][0].matcher {
            Matcher::Set(set) => {
                assert!(set.contains('a'));
                assert!(set.contains('A'));
            }
            other => panic!("expected set, got {:?}", other),
        }

        // [a-c] under `i` equals [A-Ca-c] without it... except for the flag
        // itself, which stays part of the program identity
        let folded = compile_with_flags("[a-c]", flags).unwrap();
        let spelled = compile("[A-Ca-c]").unwrap();
        assert_eq!(folded.branches, spelled.branches);
        assert!(!folded.is_equivalent(&spelled));
    }

    #[test]
    fn test_group_compiles_to_sub() {
        let program = compile("(a|b)c").unwrap();
        assert_matches!(&program.branches[0][0].matcher, Matcher::Sub(_));
        assert_eq!(program.branch_count(), 3);
    }

    #[test]
    fn test_anchor_compiles_to_assertion() {
        let program = compile("^a").unwrap();
        assert_matches!(
            &program.branches[0][0].matcher,
            Matcher::Assert(crate::grammar::escapes::AnchorKind::LineStart)
        );
    }

    #[test]
    fn test_control_escape_equals_raw_control() {
        // `\t` and a literal tab compile identically
        let escaped = compile("\\t").unwrap();
        let raw = compile("\t").unwrap();
        assert!(escaped.is_equivalent(&raw));
    }
}
