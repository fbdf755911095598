mod error;
mod info;
pub mod output;
mod result;
mod stats;
mod validation;

// Re-export public types
pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::PipelineResult;
pub use stats::PipelineStats;
pub use validation::validate_pipeline;

use crate::logging;
use std::time::Instant;

/// Compile a single pattern through the complete pipeline
/// (intake -> scan -> parse -> lower)
pub fn compile_pattern(pattern: &str) -> Result<PipelineResult, PipelineError> {
    compile_pattern_with_id(pattern, 0)
}

/// Compile a pattern under an explicit pattern id (used by batch mode so
/// the error collector can group events per pattern)
pub fn compile_pattern_with_id(
    pattern: &str,
    pattern_id: usize,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_pattern_context(pattern.to_string(), pattern_id, || {
        crate::log_info!("Starting pattern compilation pipeline", "pattern_id" => pattern_id);

        // Stage 1: Source intake
        let source = crate::source::intake(pattern)?;

        // Stage 2: Scanning (escape classification happens here)
        let mut scanner = crate::lexical::create_scanner();
        let tokens = scanner.scan(&source)?;
        let scan_metrics = scanner.metrics().clone();
        let token_count = tokens.len();

        // Stage 3: Syntax analysis
        let ast = crate::syntax::parse_tokens(tokens)?;

        // Stage 4: Compilation to canonical form
        let program = crate::compile::compile_ast(&ast, source.flags)?;

        let total_duration = start_time.elapsed();
        let result = PipelineResult::new(
            ast,
            program,
            source.metadata,
            source.flags,
            scan_metrics,
            token_count,
            total_duration,
        );

        result.log_success(pattern);

        Ok(result)
    })
}

/// Compile two patterns and decide whether they are equivalent (identical
/// canonical programs)
pub fn equivalent(a: &str, b: &str) -> Result<bool, PipelineError> {
    let left = compile_pattern(a)?;
    let right = compile_pattern(b)?;

    let verdict = left.program.is_equivalent(&right.program);

    crate::log_success!(
        crate::logging::codes::success::EQUIVALENCE_CHECK_COMPLETE,
        "Equivalence check completed",
        "left" => a,
        "right" => b,
        "equivalent" => verdict
    );

    Ok(verdict)
}
