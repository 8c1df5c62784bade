//! Metrics collected during an import run

use std::collections::HashMap;
use std::time::Duration;
use wikiflat_domain::SkipReason;

/// Counters for one import run
#[derive(Debug, Clone, Default)]
pub struct ImportMetrics {
    /// Entities handed to the projector
    pub processed: u64,

    /// Records accepted by the sink
    pub written: u64,

    /// Lines that were not valid JSON or not an entity
    pub malformed: u64,

    /// Batches committed
    pub batches: u64,

    /// Skipped entities per reason
    pub skips: HashMap<SkipReason, u64>,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl ImportMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped entity
    pub fn record_skip(&mut self, reason: SkipReason) {
        *self.skips.entry(reason).or_insert(0) += 1;
    }

    /// Skips for one reason
    pub fn skipped_for(&self, reason: SkipReason) -> u64 {
        self.skips.get(&reason).copied().unwrap_or(0)
    }

    /// Total skipped entities across all reasons
    pub fn skipped(&self) -> u64 {
        self.skips.values().sum()
    }

    /// Entities per second, zero before any time has passed
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.processed as f64 / secs
        } else {
            0.0
        }
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Import Summary".to_string(),
            "==============".to_string(),
            format!("Processed: {}", self.processed),
            format!("Written: {}", self.written),
            format!("Skipped: {}", self.skipped()),
            format!("Malformed lines: {}", self.malformed),
            format!("Batches: {}", self.batches),
            format!("Elapsed: {:.1}s", self.elapsed.as_secs_f64()),
        ];

        if !self.skips.is_empty() {
            lines.push(String::new());
            lines.push("Skips by reason:".to_string());
            let mut reasons: Vec<_> = self.skips.iter().collect();
            reasons.sort();
            for (reason, count) in reasons {
                lines.push(format!("  {}: {}", reason, count));
            }
        }

        lines.join("\n")
    }
}
