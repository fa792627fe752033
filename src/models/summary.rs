use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// Fixed per-status counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    pub fn merge(&mut self, other: StatusCounts) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Statistics for a single device, possibly accumulated over several sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DutStats {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total: usize,
    pub execution_time: f64,
    pub average_execution_time: f64,
    /// Percentage of passed tests; 0 when the device ran nothing.
    pub pass_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub execution_time: f64,
    pub average_execution_time: f64,
    pub pass_rate: f64,
}

/// Aggregated report: overall totals plus per-device stats keyed by DUT id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub overall: OverallStats,
    pub dut_stats: BTreeMap<String, DutStats>,
}
