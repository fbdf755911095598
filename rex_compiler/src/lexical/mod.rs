//! Lexical analysis module
//!
//! Tokenization of pattern text with escape classification resolved during
//! the scan. The scanner owns the class-context flag the classifier depends
//! on; no other component ever sees a backslash.

pub mod scanner;

use crate::config::constants::compile_time::scanning::*;
use crate::config::runtime::ScannerPreferences;
use crate::source::PatternSource;
use crate::tokens::TokenStream;

pub use scanner::{PatternScanner, ScanError, ScanMetrics};

// ============================================================================
// MODULE API
// ============================================================================

/// Scan a pattern source with default preferences
pub fn scan_pattern(source: &PatternSource) -> Result<TokenStream, ScanError> {
    let mut scanner = PatternScanner::new();
    scanner.scan(source)
}

/// Scan with custom runtime preferences (security boundaries remain
/// compile-time)
pub fn scan_pattern_with_preferences(
    source: &PatternSource,
    preferences: ScannerPreferences,
) -> Result<TokenStream, ScanError> {
    let mut scanner = PatternScanner::with_preferences(preferences);
    scanner.scan(source)
}

/// Create a new scanner with default preferences
pub fn create_scanner() -> PatternScanner {
    PatternScanner::new()
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Validate that scanning diagnostic codes are properly configured
pub fn init_scan_logging() -> Result<(), String> {
    let test_codes = [
        crate::logging::codes::scanning::TRUNCATED_ESCAPE,
        crate::logging::codes::scanning::UNCLOSED_CLASS,
        crate::logging::codes::scanning::TOO_MANY_TOKENS,
    ];

    for code in &test_codes {
        let description = crate::logging::codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "Scanning diagnostic code {} has no description",
                code.as_str()
            ));
        }

        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Scanning diagnostic code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Scan security limits initialized",
        "max_pattern_bytes" => MAX_PATTERN_BYTES,
        "max_token_count" => MAX_TOKEN_COUNT
    );

    Ok(())
}

/// Validate compile-time scan limits are reasonable
pub fn validate_scanning() -> Result<(), String> {
    if MAX_PATTERN_BYTES == 0 {
        return Err("MAX_PATTERN_BYTES cannot be zero".to_string());
    }
    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }
    if MAX_PATTERN_BYTES > 100_000_000 {
        return Err("MAX_PATTERN_BYTES exceeds reasonable limit".to_string());
    }
    if MAX_TOKEN_COUNT > 10_000_000 {
        return Err("MAX_TOKEN_COUNT exceeds reasonable limit".to_string());
    }

    Ok(())
}

/// Compile-time scan limits (for reporting/debugging)
#[derive(Debug, Clone)]
pub struct ScanLimits {
    pub max_pattern_bytes: usize,
    pub max_token_count: usize,
}

/// Get the current compile-time scan limits
pub fn get_scan_limits() -> ScanLimits {
    ScanLimits {
        max_pattern_bytes: MAX_PATTERN_BYTES,
        max_token_count: MAX_TOKEN_COUNT,
    }
}
