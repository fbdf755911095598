// Internal modules
pub mod batch;
pub mod compile;
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod source;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use compile::CompiledPattern;
pub use grammar::escapes::{classify_escape, EscapeClass, EscapeKind};
pub use pipeline::{compile_pattern, equivalent, PipelineError, PipelineResult};

// Re-export pipeline output for downstream consumers
pub use pipeline::output::PipelineOutput;
