//! Configuration module for logging - using compile-time constants
//!
//! Access to compile-time security constants and runtime user preferences.
//! Security boundaries are enforced at compile time and cannot be modified
//! at runtime.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

// Type aliases for clarity
type EventsLogLevel = crate::logging::events::LogLevel;
type RuntimeLogLevel = crate::config::runtime::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    validate_preferences(&preferences)?;

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Validate runtime preferences against security constraints
fn validate_preferences(preferences: &LoggingPreferences) -> Result<(), String> {
    // The security floor governs security events only; user levels above it
    // are fine as long as at least one sink can still surface errors.
    if preferences.use_structured_logging && preferences.enable_cargo_style_output {
        return Err(
            "Structured logging and cargo-style output cannot both be enabled".to_string(),
        );
    }
    Ok(())
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

/// Get minimum log level (respects user preference within security bounds)
pub fn get_min_log_level() -> EventsLogLevel {
    let preferences = get_runtime_preferences();
    preferences.min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Get security-specific log level (compile-time enforced)
pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        2 => EventsLogLevel::Info,
        _ => EventsLogLevel::Debug,
    }
}

/// Check if performance events should be logged (user preference)
pub fn log_performance_events() -> bool {
    get_runtime_preferences().log_performance_events
}

/// Get error buffer size (compile-time security constant)
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Get maximum log events per pattern (compile-time security constant)
pub fn get_max_log_events_per_pattern() -> usize {
    MAX_LOG_EVENTS_PER_PATTERN
}

/// Get maximum log message length (compile-time security constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Check if cargo-style output is enabled (user preference)
pub fn use_cargo_style_output() -> bool {
    get_runtime_preferences().enable_cargo_style_output
}

/// Check if pattern context should be included (user preference)
pub fn include_pattern_context() -> bool {
    get_runtime_preferences().include_pattern_context
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_EVENTS_PER_PATTERN > LOG_BUFFER_SIZE {
        return Err("Max log events per pattern exceeds total buffer size".to_string());
    }

    if let Some(preferences) = RUNTIME_PREFERENCES.get() {
        validate_preferences(preferences)?;
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Security Constants (Compile-time) ===\n\
         - Log buffer size: {}\n\
         - Max events per pattern: {}\n\
         - Max message length: {}\n\
         - Security min level: {}\n\
         === User Preferences (Runtime) ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Performance events: {}\n\
         - Cargo-style output: {}\n\
         - Include pattern context: {}",
        LOG_BUFFER_SIZE,
        MAX_LOG_EVENTS_PER_PATTERN,
        MAX_LOG_MESSAGE_LENGTH,
        SECURITY_MIN_LOG_LEVEL,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.log_performance_events,
        preferences.enable_cargo_style_output,
        preferences.include_pattern_context,
    )
}

/// Get recommended configuration for development
pub fn get_development_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: false,
        enable_console_logging: true,
        min_log_level: RuntimeLogLevel::Debug,
        log_performance_events: true,
        enable_cargo_style_output: true,
        include_pattern_context: true,
    }
}

/// Get recommended configuration for production
pub fn get_production_preferences() -> LoggingPreferences {
    LoggingPreferences {
        use_structured_logging: true,
        enable_console_logging: false,
        min_log_level: RuntimeLogLevel::Info,
        log_performance_events: false,
        enable_cargo_style_output: false,
        include_pattern_context: false,
    }
}
