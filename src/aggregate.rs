use std::collections::BTreeMap;

use crate::models::{DutStats, OverallStats, Session, StatusCounts, Summary};

/// Running totals for one device. Merging is associative and commutative, so
/// tallies can be folded in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceTally {
    pub counts: StatusCounts,
    pub execution_time: f64,
}

impl DeviceTally {
    pub fn from_session(session: &Session) -> Self {
        let mut tally = Self::default();
        for test in &session.tests {
            tally.counts.record(test.status);
            tally.execution_time += test.duration;
        }
        tally
    }

    pub fn merge(&mut self, other: DeviceTally) {
        self.counts.merge(other.counts);
        self.execution_time += other.execution_time;
    }

    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn average_execution_time(&self) -> f64 {
        ratio(self.execution_time, self.total())
    }

    pub fn pass_rate(&self) -> f64 {
        ratio(self.counts.passed as f64, self.total()) * 100.0
    }

    pub fn dut_stats(&self) -> DutStats {
        DutStats {
            passed: self.counts.passed,
            failed: self.counts.failed,
            skipped: self.counts.skipped,
            total: self.total(),
            execution_time: self.execution_time,
            average_execution_time: self.average_execution_time(),
            pass_rate: self.pass_rate(),
        }
    }

    pub fn overall_stats(&self) -> OverallStats {
        OverallStats {
            total_tests: self.total(),
            passed: self.counts.passed,
            failed: self.counts.failed,
            skipped: self.counts.skipped,
            execution_time: self.execution_time,
            average_execution_time: self.average_execution_time(),
            pass_rate: self.pass_rate(),
        }
    }
}

fn ratio(numerator: f64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        numerator / total as f64
    }
}

/// Per-device tallies keyed by DUT id. Sessions sharing a DUT are summed.
pub fn tally_by_device(sessions: &[Session]) -> BTreeMap<String, DeviceTally> {
    let mut tallies: BTreeMap<String, DeviceTally> = BTreeMap::new();
    for session in sessions {
        tallies
            .entry(session.dut.clone())
            .or_default()
            .merge(DeviceTally::from_session(session));
    }
    tallies
}

/// Reduce sessions into per-device and overall statistics.
pub fn summarize(sessions: &[Session]) -> Summary {
    let tallies = tally_by_device(sessions);

    // Overall is the sum of the device records, not a re-scan of the tests.
    let overall = tallies
        .values()
        .fold(DeviceTally::default(), |mut acc, tally| {
            acc.merge(*tally);
            acc
        });

    Summary {
        overall: overall.overall_stats(),
        dut_stats: tallies
            .into_iter()
            .map(|(dut, tally)| (dut, tally.dut_stats()))
            .collect(),
    }
}
