//! Batch processing module for pattern sets
//!
//! Compiles many patterns in one run - from a slice or from a pattern file
//! (one pattern per line) - with sequential and parallel execution modes.
//! Integrates with the global logging system and error collector for
//! cargo-style output.

use crate::config::constants::compile_time::batch_processing::*;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub parallel: bool,
    pub max_patterns: Option<usize>,
    pub fail_fast: bool,
    pub progress_reporting: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(4),
            parallel: true,
            max_patterns: None,
            fail_fast: false,
            progress_reporting: true,
        }
    }
}

/// Batch processing results
#[derive(Debug)]
pub struct BatchResults {
    pub successful_patterns: Vec<(usize, PipelineResult)>,
    pub failed_patterns: Vec<(usize, String, PipelineError)>,
    pub processing_duration: Duration,
    pub patterns_processed: usize,
    pub started_at: DateTime<Utc>,
}

impl BatchResults {
    pub fn new() -> Self {
        Self {
            successful_patterns: Vec::new(),
            failed_patterns: Vec::new(),
            processing_duration: Duration::new(0, 0),
            patterns_processed: 0,
            started_at: Utc::now(),
        }
    }

    pub fn success_count(&self) -> usize {
        self.successful_patterns.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_patterns.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.patterns_processed == 0 {
            0.0
        } else {
            self.successful_patterns.len() as f64 / self.patterns_processed as f64
        }
    }

    pub fn add_success(&mut self, pattern_id: usize, result: PipelineResult) {
        self.successful_patterns.push((pattern_id, result));
        self.patterns_processed += 1;
    }

    pub fn add_failure(&mut self, pattern_id: usize, pattern: String, error: PipelineError) {
        self.failed_patterns.push((pattern_id, pattern, error));
        self.patterns_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successful_patterns.extend(other.successful_patterns);
        self.failed_patterns.extend(other.failed_patterns);
        self.patterns_processed += other.patterns_processed;
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch started {}: {} patterns processed, {} successful ({:.1}%), {} failed, {:.3}s total",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.patterns_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

impl Default for BatchResults {
    fn default() -> Self {
        Self::new()
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Pattern file not found: {path}")]
    FileNotFound { path: String },

    #[error("No patterns found in: {path}")]
    NoPatternsFound { path: String },

    #[error("Too many patterns: {count} (max: {max})")]
    TooManyPatterns { count: usize, max: usize },

    #[error("IO error reading pattern file: {error}")]
    IoError { error: String },

    #[error("Invalid batch configuration: {message}")]
    ConfigError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BatchError::FileNotFound { .. }
            | BatchError::NoPatternsFound { .. }
            | BatchError::IoError { .. } => codes::batch::PATTERN_FILE_ERROR,
            BatchError::TooManyPatterns { .. } => codes::batch::BATCH_LIMIT_EXCEEDED,
            BatchError::ConfigError { .. } => codes::batch::BATCH_CONFIG_ERROR,
        }
    }
}

// ============================================================================
// PATTERN FILE LOADING
// ============================================================================

/// Load patterns from a file: one pattern per line, blank lines and lines
/// starting with `#` skipped.
pub fn load_pattern_file(path: &Path) -> Result<Vec<String>, BatchError> {
    if !path.exists() {
        return Err(BatchError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| BatchError::IoError {
        error: e.to_string(),
    })?;

    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if patterns.is_empty() {
        return Err(BatchError::NoPatternsFound {
            path: path.display().to_string(),
        });
    }

    crate::log_info!("Pattern file loaded",
        "path" => path.display(),
        "patterns" => patterns.len()
    );

    Ok(patterns)
}

// ============================================================================
// BATCH COMPILATION
// ============================================================================

/// Compile a set of patterns according to the batch configuration
pub fn compile_pattern_set(
    patterns: &[String],
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    validate_config(config)?;

    let limit = config.max_patterns.unwrap_or(MAX_PATTERNS_PER_BATCH);
    if patterns.len() > limit {
        let error = BatchError::TooManyPatterns {
            count: patterns.len(),
            max: limit,
        };
        crate::log_error!(error.error_code(), "Batch pattern limit exceeded",
            "count" => patterns.len(),
            "limit" => limit
        );
        return Err(error);
    }

    let start = Instant::now();

    crate::log_info!("Starting batch compilation",
        "patterns" => patterns.len(),
        "parallel" => config.parallel,
        "max_threads" => config.max_threads,
        "fail_fast" => config.fail_fast
    );

    // fail_fast needs a deterministic stop point, so it forces sequential
    // execution
    let mut results = if config.parallel && !config.fail_fast && patterns.len() > 1 {
        compile_parallel(patterns, config)
    } else {
        compile_sequential(patterns, config)
    };

    results.processing_duration = start.elapsed();

    crate::log_success!(codes::success::BATCH_COMPLETE,
        "Batch compilation completed",
        "processed" => results.patterns_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "duration_ms" => format!("{:.1}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(results)
}

/// Compile all patterns from a pattern file
pub fn compile_pattern_file(
    path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let patterns = load_pattern_file(path)?;
    compile_pattern_set(&patterns, config)
}

fn compile_sequential(patterns: &[String], config: &BatchConfig) -> BatchResults {
    let mut results = BatchResults::new();

    for (pattern_id, pattern) in patterns.iter().enumerate() {
        match pipeline::compile_pattern_with_id(pattern, pattern_id) {
            Ok(result) => results.add_success(pattern_id, result),
            Err(error) => {
                results.add_failure(pattern_id, pattern.clone(), error);
                if config.fail_fast {
                    crate::log_warning!("Stopping batch after first failure",
                        "pattern_id" => pattern_id
                    );
                    break;
                }
            }
        }
    }

    results
}

fn compile_parallel(patterns: &[String], config: &BatchConfig) -> BatchResults {
    let threads = config.max_threads.max(1).min(patterns.len());
    let chunk_size = patterns.len().div_ceil(threads);
    let merged = Mutex::new(BatchResults::new());

    thread::scope(|scope| {
        for (chunk_index, chunk) in patterns.chunks(chunk_size).enumerate() {
            let merged = &merged;
            let base_id = chunk_index * chunk_size;

            scope.spawn(move || {
                let mut local = BatchResults::new();
                for (offset, pattern) in chunk.iter().enumerate() {
                    let pattern_id = base_id + offset;
                    match pipeline::compile_pattern_with_id(pattern, pattern_id) {
                        Ok(result) => local.add_success(pattern_id, result),
                        Err(error) => local.add_failure(pattern_id, pattern.clone(), error),
                    }
                }
                merged.lock().unwrap().merge(local);
            });
        }
    });

    merged.into_inner().unwrap()
}

fn validate_config(config: &BatchConfig) -> Result<(), BatchError> {
    if config.max_threads == 0 {
        return Err(BatchError::ConfigError {
            message: "max_threads must be at least 1".to_string(),
        });
    }
    if config.max_threads > MAX_WORKER_THREADS {
        return Err(BatchError::ConfigError {
            message: format!(
                "max_threads {} exceeds limit {}",
                config.max_threads, MAX_WORKER_THREADS
            ),
        });
    }
    Ok(())
}

/// Batch capability information
#[derive(Debug, Clone)]
pub struct BatchInfo {
    pub max_recommended_threads: usize,
    pub max_patterns_per_batch: usize,
}

/// Get batch processing capabilities
pub fn get_batch_info() -> BatchInfo {
    BatchInfo {
        max_recommended_threads: MAX_WORKER_THREADS,
        max_patterns_per_batch: MAX_PATTERNS_PER_BATCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sequential_batch() {
        let config = BatchConfig {
            parallel: false,
            ..Default::default()
        };
        let results =
            compile_pattern_set(&patterns(&["[a-z]", "[\\§]", "(broken"]), &config).unwrap();

        assert_eq!(results.patterns_processed, 3);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.failure_count(), 1);
        assert!((results.success_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_batch() {
        let config = BatchConfig {
            parallel: true,
            max_threads: 2,
            ..Default::default()
        };
        let set = patterns(&["a", "b|c", "[0-9]+", "x{2,3}", "\\d\\w"]);
        let results = compile_pattern_set(&set, &config).unwrap();

        assert_eq!(results.patterns_processed, 5);
        assert_eq!(results.success_count(), 5);
    }

    #[test]
    fn test_fail_fast_stops_early() {
        let config = BatchConfig {
            parallel: false,
            fail_fast: true,
            ..Default::default()
        };
        let results =
            compile_pattern_set(&patterns(&["(broken", "never", "compiled"]), &config).unwrap();

        assert_eq!(results.patterns_processed, 1);
        assert_eq!(results.failure_count(), 1);
    }

    #[test]
    fn test_batch_limit() {
        let config = BatchConfig {
            max_patterns: Some(2),
            ..Default::default()
        };
        let result = compile_pattern_set(&patterns(&["a", "b", "c"]), &config);
        assert!(matches!(
            result,
            Err(BatchError::TooManyPatterns { count: 3, max: 2 })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = BatchConfig {
            max_threads: 0,
            ..Default::default()
        };
        assert!(matches!(
            compile_pattern_set(&patterns(&["a"]), &config),
            Err(BatchError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_pattern_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# pattern set for smoke testing").unwrap();
        writeln!(file, "[a-z]+").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[\\§]").unwrap();
        file.flush().unwrap();

        let config = BatchConfig {
            parallel: false,
            ..Default::default()
        };
        let results = compile_pattern_file(file.path(), &config).unwrap();
        assert_eq!(results.patterns_processed, 2);
        assert_eq!(results.success_count(), 2);
    }

    #[test]
    fn test_missing_pattern_file() {
        let config = BatchConfig::default();
        let result = compile_pattern_file(Path::new("/nonexistent/patterns.txt"), &config);
        assert!(matches!(result, Err(BatchError::FileNotFound { .. })));
    }

    #[test]
    fn test_empty_pattern_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# only comments").unwrap();
        file.flush().unwrap();

        let result = load_pattern_file(file.path());
        assert!(matches!(result, Err(BatchError::NoPatternsFound { .. })));
    }

    #[test]
    fn test_summary_format() {
        let config = BatchConfig {
            parallel: false,
            ..Default::default()
        };
        let results = compile_pattern_set(&patterns(&["a"]), &config).unwrap();
        let summary = results.summary();
        assert!(summary.contains("1 patterns processed"));
        assert!(summary.contains("UTC"));
    }
}
