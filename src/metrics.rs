// Resolution metrics
//
// Counts what one resolution pass did, for the debug log and the binary's summary.

use std::time::{Duration, Instant};

/// Counters for a single argument-resolution pass.
///
/// Owned by the resolver and only touched from its thread, so plain integers
/// are enough.
#[derive(Debug, Clone)]
pub struct ResolveMetrics {
    /// Short-form arguments applied, including long-form aliases
    pub short_form: u64,

    /// Long-form arguments applied
    pub long_form: u64,

    /// Argument files opened with `-A`
    pub args_files: u64,

    /// Plain lines routed to a pending mode or read from a data file
    pub data_lines: u64,

    /// Game and check files registered
    pub source_files: u64,

    /// Inconsistencies reported without stopping
    pub warnings: u64,

    start_time: Instant,
}

impl ResolveMetrics {
    pub fn new() -> Self {
        Self {
            short_form: 0,
            long_form: 0,
            args_files: 0,
            data_lines: 0,
            source_files: 0,
            warnings: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_short_form(&mut self) {
        self.short_form += 1;
    }

    pub fn record_long_form(&mut self) {
        self.long_form += 1;
    }

    pub fn record_args_file(&mut self) {
        self.args_files += 1;
    }

    pub fn record_data_line(&mut self) {
        self.data_lines += 1;
    }

    pub fn record_source_file(&mut self) {
        self.source_files += 1;
    }

    pub fn record_warning(&mut self) {
        self.warnings += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Total arguments applied from every source.
    pub fn arguments(&self) -> u64 {
        self.short_form + self.long_form
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::debug!(
            "Resolved {} arguments ({} short, {} long) in {:.2}ms",
            self.arguments(),
            self.short_form,
            self.long_form,
            self.elapsed().as_secs_f64() * 1000.0
        );
        tracing::debug!(
            "Argument files: {}, data lines: {}, source files: {}, warnings: {}",
            self.args_files,
            self.data_lines,
            self.source_files,
            self.warnings
        );
    }
}

impl Default for ResolveMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut metrics = ResolveMetrics::new();
        metrics.record_short_form();
        metrics.record_short_form();
        metrics.record_long_form();
        metrics.record_warning();

        assert_eq!(metrics.arguments(), 3);
        assert_eq!(metrics.warnings, 1);
        assert_eq!(metrics.data_lines, 0);
    }

    #[test]
    fn test_elapsed_advances() {
        let metrics = ResolveMetrics::new();
        std::thread::sleep(Duration::from_millis(5));
        assert!(metrics.elapsed() >= Duration::from_millis(5));
    }
}
