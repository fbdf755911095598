use crate::config::constants::compile_time::scanning::MAX_PATTERN_BYTES;

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub supports_source_intake: bool,
    pub supports_scanning: bool,
    pub supports_syntax_analysis: bool,
    pub supports_compilation: bool,
    pub supports_equivalence_checks: bool,
    pub max_pattern_bytes: usize,
    pub supported_flags: Vec<char>,
    pub global_logging_enabled: bool,
    pub cargo_style_output: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Pattern Compilation Pipeline:\n\
             - Pipeline Stages: {}\n\
             - Source Intake: {}\n\
             - Scanning: {}\n\
             - Syntax Analysis: {}\n\
             - Compilation: {}\n\
             - Equivalence Checks: {}\n\
             - Max Pattern Size: {} KB\n\
             - Supported Flags: {}\n\
             - Global Logging: {}\n\
             - Cargo-style Output: {}",
            self.pipeline_stages,
            self.supports_source_intake,
            self.supports_scanning,
            self.supports_syntax_analysis,
            self.supports_compilation,
            self.supports_equivalence_checks,
            self.max_pattern_bytes / 1024,
            self.supported_flags
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            self.global_logging_enabled,
            self.cargo_style_output
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage pattern compiler with flags [{}] and global logging",
            self.pipeline_stages,
            self.supported_flags
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join("")
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        pipeline_stages: 4,
        supports_source_intake: true,
        supports_scanning: true,
        supports_syntax_analysis: true,
        supports_compilation: true,
        supports_equivalence_checks: true,
        max_pattern_bytes: MAX_PATTERN_BYTES,
        supported_flags: vec!['x', 'i'],
        global_logging_enabled: true,
        cargo_style_output: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_report() {
        let info = get_pipeline_info();
        assert_eq!(info.pipeline_stages, 4);
        assert!(info.report().contains("Equivalence Checks"));
        assert!(info.summary().contains("4-stage"));
    }
}
