//! Error collector for pattern-set processing with cargo-style output
//!
//! Provides organized error collection and reporting when many patterns are
//! compiled in one run (batch mode, test harnesses).

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Longest pattern excerpt attached to log events
const EXCERPT_LEN: usize = 40;

// ============================================================================
// PATTERN PROCESSING CONTEXT
// ============================================================================

/// Context information for a single pattern compilation
#[derive(Debug, Clone)]
pub struct PatternProcessingContext {
    pub pattern_id: usize,
    pub pattern: String,
    pub start_time: Instant,
}

impl PatternProcessingContext {
    pub fn new(pattern: String, pattern_id: usize) -> Self {
        Self {
            pattern_id,
            pattern,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Short excerpt of the pattern for log context values
    pub fn excerpt(&self) -> String {
        if self.pattern.chars().count() <= EXCERPT_LEN {
            self.pattern.clone()
        } else {
            let truncated: String = self.pattern.chars().take(EXCERPT_LEN).collect();
            format!("{}…", truncated)
        }
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of pattern-set processing results
#[derive(Debug, Clone)]
pub struct ProcessingSummary {
    pub total_patterns: usize,
    pub successful_patterns: usize,
    pub failed_patterns: usize,
    pub patterns_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
    pub average_pattern_time: Duration,
}

impl ProcessingSummary {
    pub fn new() -> Self {
        Self {
            total_patterns: 0,
            successful_patterns: 0,
            failed_patterns: 0,
            patterns_with_warnings: 0,
            total_errors: 0,
            total_warnings: 0,
            total_processing_time: Duration::new(0, 0),
            average_pattern_time: Duration::new(0, 0),
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_patterns == 0 {
            0.0
        } else {
            self.successful_patterns as f64 / self.total_patterns as f64
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

impl Default for ProcessingSummary {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe error collector for pattern-set processing
pub struct ErrorCollector {
    /// Events organized by pattern id for cargo-style output
    pattern_events: Mutex<BTreeMap<usize, Vec<LogEvent>>>,

    /// Processing contexts for excerpt and timing information
    pattern_contexts: Mutex<BTreeMap<usize, PatternProcessingContext>>,

    /// Global processing start time
    processing_start: Instant,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            pattern_events: Mutex::new(BTreeMap::new()),
            pattern_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific pattern
    pub fn record_event(&self, pattern_id: usize, event: LogEvent) {
        let mut events = self.pattern_events.lock().unwrap();

        let pattern_events = events.entry(pattern_id).or_insert_with(Vec::new);

        if pattern_events.len() < MAX_LOG_EVENTS_PER_PATTERN {
            pattern_events.push(event);
        } else if pattern_events.len() == MAX_LOG_EVENTS_PER_PATTERN {
            let summary_event = LogEvent::warning(&format!(
                "Too many events for pattern (limit: {})",
                MAX_LOG_EVENTS_PER_PATTERN
            ));
            pattern_events.push(summary_event);
        }
    }

    /// Record pattern processing context
    pub fn record_pattern_context(&self, context: PatternProcessingContext) {
        let mut contexts = self.pattern_contexts.lock().unwrap();
        contexts.insert(context.pattern_id, context);
    }

    /// Get all events for a specific pattern
    pub fn get_pattern_events(&self, pattern_id: usize) -> Vec<LogEvent> {
        let events = self.pattern_events.lock().unwrap();
        events.get(&pattern_id).cloned().unwrap_or_default()
    }

    /// Get errors for a specific pattern
    pub fn get_pattern_errors(&self, pattern_id: usize) -> Vec<LogEvent> {
        let events = self.pattern_events.lock().unwrap();
        events
            .get(&pattern_id)
            .map(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
            .unwrap_or_default()
    }

    /// Get error count for a specific pattern
    pub fn get_pattern_error_count(&self, pattern_id: usize) -> usize {
        let events = self.pattern_events.lock().unwrap();
        events
            .get(&pattern_id)
            .map(|events| events.iter().filter(|e| e.is_error()).count())
            .unwrap_or(0)
    }

    /// Check if a pattern has any errors
    pub fn pattern_has_errors(&self, pattern_id: usize) -> bool {
        self.get_pattern_error_count(pattern_id) > 0
    }

    /// Get processing summary
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.pattern_events.lock().unwrap();
        let contexts = self.pattern_contexts.lock().unwrap();

        let mut summary = ProcessingSummary::new();
        summary.total_patterns = events.len();
        summary.total_processing_time = self.processing_start.elapsed();

        let mut total_pattern_time = Duration::new(0, 0);
        let mut patterns_with_timing = 0;

        for (pattern_id, pattern_events) in events.iter() {
            let has_errors = pattern_events.iter().any(|e| e.is_error());
            let has_warnings = pattern_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_patterns += 1;
            } else if has_warnings {
                summary.patterns_with_warnings += 1;
            } else {
                summary.successful_patterns += 1;
            }

            for event in pattern_events {
                if event.is_error() {
                    summary.total_errors += 1;
                } else if event.is_warning() {
                    summary.total_warnings += 1;
                }
            }

            if let Some(context) = contexts.get(pattern_id) {
                total_pattern_time += context.elapsed();
                patterns_with_timing += 1;
            }
        }

        if patterns_with_timing > 0 {
            summary.average_pattern_time = total_pattern_time / patterns_with_timing as u32;
        }

        summary
    }

    /// Get capacity info: (current events, max, fill ratio)
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let events = self.pattern_events.lock().unwrap();
        let current: usize = events.values().map(|v| v.len()).sum();
        let max = MAX_ERROR_COLLECTION;
        (current, max, current as f64 / max as f64)
    }

    /// Clear all collected events and contexts
    pub fn clear(&self) {
        self.pattern_events.lock().unwrap().clear();
        self.pattern_contexts.lock().unwrap().clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE OUTPUT
// ============================================================================

/// Format collected events grouped per pattern, cargo style
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let events = collector.pattern_events.lock().unwrap();
    let contexts = collector.pattern_contexts.lock().unwrap();

    let mut output = String::new();

    for (pattern_id, pattern_events) in events.iter() {
        let errors: Vec<_> = pattern_events.iter().filter(|e| e.is_error()).collect();
        let warnings: Vec<_> = pattern_events.iter().filter(|e| e.is_warning()).collect();

        if errors.is_empty() && warnings.is_empty() {
            continue;
        }

        let excerpt = contexts
            .get(pattern_id)
            .map(|c| c.excerpt())
            .unwrap_or_else(|| format!("<pattern #{}>", pattern_id));

        output.push_str(&format!("pattern #{}: {}\n", pattern_id, excerpt));

        for error in &errors {
            output.push_str(&format!("  error[{}]: {}\n", error.code, error.message));
            if let Some(span) = &error.span {
                output.push_str(&format!("    --> pattern:{}\n", span));
            }
        }

        for warning in &warnings {
            output.push_str(&format!("  warning: {}\n", warning.message));
        }
    }

    let summary = collector.get_summary();
    output.push_str(&format!(
        "\n{} pattern(s): {} ok, {} failed, {} warning(s)\n",
        summary.total_patterns,
        summary.successful_patterns,
        summary.failed_patterns,
        summary.total_warnings
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_record_and_query_events() {
        let collector = ErrorCollector::new();

        collector.record_event(
            0,
            LogEvent::error(codes::scanning::TRUNCATED_ESCAPE, "Truncated escape"),
        );
        collector.record_event(
            0,
            LogEvent::success(codes::success::SCAN_COMPLETE, "Scan completed"),
        );
        collector.record_event(
            1,
            LogEvent::success(codes::success::COMPILE_COMPLETE, "Compiled"),
        );

        assert_eq!(collector.get_pattern_events(0).len(), 2);
        assert_eq!(collector.get_pattern_error_count(0), 1);
        assert!(collector.pattern_has_errors(0));
        assert!(!collector.pattern_has_errors(1));
    }

    #[test]
    fn test_summary_counts() {
        let collector = ErrorCollector::new();

        collector.record_event(
            0,
            LogEvent::error(codes::syntax::UNBALANCED_GROUP, "Unbalanced group"),
        );
        collector.record_event(1, LogEvent::warning("suspicious quantifier"));
        collector.record_event(
            2,
            LogEvent::success(codes::success::COMPILE_COMPLETE, "Compiled"),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_patterns, 3);
        assert_eq!(summary.failed_patterns, 1);
        assert_eq!(summary.patterns_with_warnings, 1);
        assert_eq!(summary.successful_patterns, 1);
        assert!(summary.has_errors());
        assert!((summary.success_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_excerpt_truncation() {
        let long_pattern = "a".repeat(100);
        let context = PatternProcessingContext::new(long_pattern, 7);

        let excerpt = context.excerpt();
        assert!(excerpt.chars().count() <= EXCERPT_LEN + 1);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        collector.record_pattern_context(PatternProcessingContext::new("(ab".to_string(), 0));
        collector.record_event(
            0,
            LogEvent::error(codes::syntax::UNBALANCED_GROUP, "Unbalanced group"),
        );

        let rendered = format_cargo_style_errors(&collector);
        assert!(rendered.contains("pattern #0"));
        assert!(rendered.contains("error[E042]"));
        assert!(rendered.contains("1 failed"));
    }

    #[test]
    fn test_clear() {
        let collector = ErrorCollector::new();
        collector.record_event(0, LogEvent::warning("w"));
        collector.clear();
        assert_eq!(collector.get_pattern_events(0).len(), 0);
    }
}
