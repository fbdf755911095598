use crate::compile::CompiledPattern;
use crate::grammar::ast::nodes::PatternAst;
use crate::lexical::ScanMetrics;
use crate::source::{PatternFlags, SourceMetadata};
use std::time::Duration;

/// Complete pipeline result containing all processing stages
#[derive(Debug)]
pub struct PipelineResult {
    pub ast: PatternAst,
    pub program: CompiledPattern,
    pub source_metadata: SourceMetadata,
    pub flags: PatternFlags,
    pub scan_metrics: ScanMetrics,
    pub token_count: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ast: PatternAst,
        program: CompiledPattern,
        source_metadata: SourceMetadata,
        flags: PatternFlags,
        scan_metrics: ScanMetrics,
        token_count: usize,
        processing_duration: Duration,
    ) -> Self {
        Self {
            ast,
            program,
            source_metadata,
            flags,
            scan_metrics,
            token_count,
            processing_duration,
        }
    }

    pub fn log_success(&self, pattern: &str) {
        crate::log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Complete pattern compilation pipeline succeeded",
            "pattern" => pattern,
            "duration_ms" => format!("{:.3}", self.processing_duration.as_secs_f64() * 1000.0),
            "tokens" => self.token_count,
            "branches" => self.program.branches.len(),
            "spans" => self.program.span_count(),
            "redundant_escapes" => self.scan_metrics.redundant_escapes
        );
    }
}
