use crate::compile::CompileError;
use crate::lexical::ScanError;
use crate::source::SourceError;
use crate::syntax::SyntaxError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Pattern intake failed: {0}")]
    SourceIntake(#[from] SourceError),

    #[error("Pattern scan failed: {0}")]
    Scan(#[from] ScanError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Pattern compilation failed: {0}")]
    Compilation(#[from] CompileError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        match error {
            PipelineError::Pipeline { message } => assert_eq!(message, "Test error"),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_stage_error_conversion() {
        let scan: PipelineError = ScanError::TruncatedEscape { offset: 3 }.into();
        assert!(matches!(scan, PipelineError::Scan(_)));

        let intake: PipelineError = SourceError::EmptyPattern.into();
        assert!(matches!(intake, PipelineError::SourceIntake(_)));
    }
}
