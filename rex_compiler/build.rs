// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    scanning: ScanningLimits,
    syntax: SyntaxLimits,
    compiling: CompilingLimits,
    batch_processing: BatchProcessingLimits,
    security: SecurityLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct ScanningLimits {
    max_pattern_bytes: usize,
    max_token_count: usize,
    metrics_buffer_size: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_group_depth: usize,
    max_error_history: usize,
    max_lookahead_tokens: usize,
}

#[derive(serde::Deserialize)]
struct CompilingLimits {
    max_quantifier_bound: u32,
    max_program_spans: usize,
    max_alternation_branches: usize,
}

#[derive(serde::Deserialize)]
struct BatchProcessingLimits {
    max_worker_threads: usize,
    max_patterns_per_batch: usize,
}

#[derive(serde::Deserialize)]
struct SecurityLimits {
    max_processing_time_seconds: u64,
    max_concurrent_operations: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_pattern: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=REX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=REX_CONFIG_DIR");

    let profile = env::var("REX_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("REX_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of rex_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_security_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_PATTERN_BYTES: usize = 16_000_000;
    const ABSOLUTE_MAX_TOKEN_COUNT: usize = 50_000_000;
    const ABSOLUTE_MAX_PROCESSING_TIME: u64 = 3600;

    if config.scanning.max_pattern_bytes > ABSOLUTE_MAX_PATTERN_BYTES {
        panic!("SECURITY: max_pattern_bytes exceeds absolute maximum");
    }

    if config.scanning.max_token_count > ABSOLUTE_MAX_TOKEN_COUNT {
        panic!("SECURITY: max_token_count exceeds absolute maximum");
    }

    if config.security.max_processing_time_seconds > ABSOLUTE_MAX_PROCESSING_TIME {
        panic!("SECURITY: max_processing_time_seconds exceeds absolute maximum");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if profile == "production" {
        if config.scanning.max_pattern_bytes > 1_000_000 {
            panic!("PRODUCTION: max_pattern_bytes too high for production");
        }
        if config.security.max_processing_time_seconds > 600 {
            panic!("PRODUCTION: max_processing_time_seconds too high for production");
        }
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod scanning {{
        pub const MAX_PATTERN_BYTES: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const METRICS_BUFFER_SIZE: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_GROUP_DEPTH: usize = {};
        pub const MAX_ERROR_HISTORY: usize = {};
        pub const MAX_LOOKAHEAD_TOKENS: usize = {};
    }}

    pub mod compiling {{
        pub const MAX_QUANTIFIER_BOUND: u32 = {};
        pub const MAX_PROGRAM_SPANS: usize = {};
        pub const MAX_ALTERNATION_BRANCHES: usize = {};
    }}

    pub mod batch_processing {{
        pub const MAX_WORKER_THREADS: usize = {};
        pub const MAX_PATTERNS_PER_BATCH: usize = {};
    }}

    pub mod security {{
        pub const MAX_PROCESSING_TIME_SECONDS: u64 = {};
        pub const MAX_CONCURRENT_OPERATIONS: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_PATTERN: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Scanning
        config.scanning.max_pattern_bytes,
        config.scanning.max_token_count,
        config.scanning.metrics_buffer_size,
        // Syntax
        config.syntax.max_group_depth,
        config.syntax.max_error_history,
        config.syntax.max_lookahead_tokens,
        // Compiling
        config.compiling.max_quantifier_bound,
        config.compiling.max_program_spans,
        config.compiling.max_alternation_branches,
        // Batch Processing
        config.batch_processing.max_worker_threads,
        config.batch_processing.max_patterns_per_batch,
        // Security
        config.security.max_processing_time_seconds,
        config.security.max_concurrent_operations,
        // Logging
        config.logging.max_error_collection,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_pattern,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
