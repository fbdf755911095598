use crate::compile::CompiledPattern;
use crate::source::{PatternFlags, SourceMetadata};
use serde::{Deserialize, Serialize};

/// Serializable pipeline output for downstream consumers
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub program: CompiledPattern,
    pub flags: PatternFlags,
    pub source_metadata: SourceMetadata,
}

impl PipelineOutput {
    pub fn new(
        program: CompiledPattern,
        flags: PatternFlags,
        source_metadata: SourceMetadata,
    ) -> Self {
        Self {
            program,
            flags,
            source_metadata,
        }
    }
}
