use std::time::Duration;

/// Pipeline processing statistics
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub total_patterns_processed: usize,
    pub successful_compilations: usize,
    pub failed_compilations: usize,
    pub average_processing_time: Duration,
    pub total_tokens_processed: usize,
    pub total_redundant_escapes: usize,
}

impl PipelineStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_patterns_processed == 0 {
            0.0
        } else {
            self.successful_compilations as f64 / self.total_patterns_processed as f64
        }
    }

    pub fn record_success(&mut self, tokens: usize, redundant_escapes: usize, duration: Duration) {
        self.total_patterns_processed += 1;
        self.successful_compilations += 1;
        self.total_tokens_processed += tokens;
        self.total_redundant_escapes += redundant_escapes;
        self.update_average(duration);
    }

    pub fn record_failure(&mut self, duration: Duration) {
        self.total_patterns_processed += 1;
        self.failed_compilations += 1;
        self.update_average(duration);
    }

    fn update_average(&mut self, duration: Duration) {
        let n = self.total_patterns_processed as u32;
        if n == 1 {
            self.average_processing_time = duration;
        } else {
            let total = self.average_processing_time * (n - 1) + duration;
            self.average_processing_time = total / n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let mut stats = PipelineStats::default();
        assert_eq!(stats.success_rate(), 0.0);

        stats.record_success(5, 1, Duration::from_millis(2));
        stats.record_failure(Duration::from_millis(4));

        assert_eq!(stats.total_patterns_processed, 2);
        assert!((stats.success_rate() - 0.5).abs() < 1e-9);
        assert_eq!(stats.total_redundant_escapes, 1);
        assert_eq!(stats.average_processing_time, Duration::from_millis(3));
    }
}
