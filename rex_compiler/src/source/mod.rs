//! Pattern source intake
//!
//! Accepts raw pattern text or the delimited literal form `/pattern/flags`
//! and produces a validated [`PatternSource`] for the scanner.

pub mod reader;

pub use reader::{PatternFlags, PatternSource, SourceError, SourceMetadata};

/// Parse pattern input (raw or `/.../ flags` literal) into a source
pub fn intake(input: &str) -> Result<PatternSource, SourceError> {
    PatternSource::parse(input)
}

/// Validate that source-intake diagnostic codes are configured
pub fn init_source_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::source::EMPTY_PATTERN,
        crate::logging::codes::source::PATTERN_TOO_LARGE,
        crate::logging::codes::source::UNTERMINATED_LITERAL,
        crate::logging::codes::source::UNKNOWN_FLAG,
    ];

    for code in &test_codes {
        if crate::logging::codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Source diagnostic code {} has no description",
                code.as_str()
            ));
        }
    }

    Ok(())
}
