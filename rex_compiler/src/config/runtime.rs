// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerPreferences {
    /// Whether to collect detailed token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to track meaningful/redundant escape counts separately
    pub track_escape_metrics: bool,

    /// Whether to log character-class statistics
    pub log_class_statistics: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,
}

impl Default for ScannerPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var("REX_SCANNER_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_escape_metrics: env::var("REX_SCANNER_TRACK_ESCAPES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_class_statistics: env::var("REX_SCANNER_LOG_CLASS_STATS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_position_in_errors: env::var("REX_SCANNER_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilePreferences {
    /// Whether to log per-stage timing details
    pub log_stage_timing: bool,

    /// Whether to include the canonical program in success output
    pub include_program_in_output: bool,

    /// Whether to log span-merge statistics during canonicalization
    pub log_canonicalization_details: bool,
}

impl Default for CompilePreferences {
    fn default() -> Self {
        Self {
            log_stage_timing: env::var("REX_COMPILE_LOG_STAGE_TIMING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_program_in_output: env::var("REX_COMPILE_INCLUDE_PROGRAM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_canonicalization_details: env::var("REX_COMPILE_LOG_CANONICALIZATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level (within security constraints)
    /// Note: Security events will still be logged regardless of this setting
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include pattern context in log messages
    pub include_pattern_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("REX_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("REX_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("REX_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env::var("REX_LOGGING_LOG_PERFORMANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_cargo_style_output: env::var("REX_LOGGING_CARGO_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_pattern_context: env::var("REX_LOGGING_INCLUDE_PATTERN_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }

    /// Convert from events::LogLevel for compatibility
    pub fn from_events_log_level(level: crate::logging::events::LogLevel) -> Self {
        match level {
            crate::logging::events::LogLevel::Error => LogLevel::Error,
            crate::logging::events::LogLevel::Warning => LogLevel::Warning,
            crate::logging::events::LogLevel::Info => LogLevel::Info,
            crate::logging::events::LogLevel::Debug => LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub scanner: ScannerPreferences,
    #[serde(default)]
    pub compile: CompilePreferences,
    #[serde(default)]
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load runtime preferences from a TOML file, falling back to
    /// environment-derived defaults for absent sections.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read {}: {}", path.as_ref().display(), e))?;
        toml::from_str(&content)
            .map_err(|e| format!("Invalid TOML in {}: {}", path.as_ref().display(), e))
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Scanner
    pub const SCANNER_DETAILED_METRICS: &str = "REX_SCANNER_DETAILED_METRICS";
    pub const SCANNER_TRACK_ESCAPES: &str = "REX_SCANNER_TRACK_ESCAPES";
    pub const SCANNER_LOG_CLASS_STATS: &str = "REX_SCANNER_LOG_CLASS_STATS";
    pub const SCANNER_INCLUDE_POSITIONS: &str = "REX_SCANNER_INCLUDE_POSITIONS";

    // Compile
    pub const COMPILE_LOG_STAGE_TIMING: &str = "REX_COMPILE_LOG_STAGE_TIMING";
    pub const COMPILE_INCLUDE_PROGRAM: &str = "REX_COMPILE_INCLUDE_PROGRAM";
    pub const COMPILE_LOG_CANONICALIZATION: &str = "REX_COMPILE_LOG_CANONICALIZATION";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "REX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "REX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "REX_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "REX_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_CARGO_STYLE: &str = "REX_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_PATTERN_CONTEXT: &str = "REX_LOGGING_INCLUDE_PATTERN_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::SCANNER_TRACK_ESCAPES.is_empty());
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(!env_vars::COMPILE_INCLUDE_PROGRAM.is_empty());
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let parsed: RuntimeConfig = toml::from_str(
            r#"
            [scanner]
            collect_detailed_metrics = false
            track_escape_metrics = true
            log_class_statistics = false
            include_position_in_errors = true
            "#,
        )
        .unwrap();

        assert!(!parsed.scanner.collect_detailed_metrics);
        assert!(parsed.scanner.track_escape_metrics);
    }
}
