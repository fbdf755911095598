//! Compilation module: canonical lowering of parsed patterns
//!
//! Lowers a [`PatternAst`] into a [`CompiledPattern`] whose consuming
//! matchers are normalized scalar sets. Equivalence of two patterns is
//! structural equality of their canonical programs.

pub mod charset;
pub mod compiler;
pub mod program;

pub use charset::{CharSet, CharSpan, SCALAR_MAX};
pub use compiler::{CompileError, PatternCompiler};
pub use program::{CompiledPattern, Matcher, Step};

use crate::config::runtime::CompilePreferences;
use crate::grammar::ast::nodes::PatternAst;
use crate::source::PatternFlags;

/// Compile a parsed pattern with default preferences
pub fn compile_ast(ast: &PatternAst, flags: PatternFlags) -> Result<CompiledPattern, CompileError> {
    PatternCompiler::new().compile(ast, flags)
}

/// Compile with custom runtime preferences
pub fn compile_ast_with_preferences(
    ast: &PatternAst,
    flags: PatternFlags,
    preferences: CompilePreferences,
) -> Result<CompiledPattern, CompileError> {
    PatternCompiler::with_preferences(preferences).compile(ast, flags)
}

/// Validate that compilation diagnostic codes are properly configured
pub fn init_compile_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::compiling::QUANTIFIER_RANGE,
        crate::logging::codes::compiling::QUANTIFIER_TOO_LARGE,
        crate::logging::codes::compiling::UNMATCHABLE_CLASS,
        crate::logging::codes::compiling::PROGRAM_TOO_LARGE,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Compilation diagnostic code {} has no description",
                code.as_str()
            ));
        }
    }

    Ok(())
}
