use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// One executed test case, normalized by the record validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub status: TestStatus,
    /// Seconds; always finite and non-negative.
    pub duration: f64,
}

/// One test run against a single device under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub dut: String,
    pub session_id: String,
    pub tests: Vec<TestCase>,
}

impl Session {
    pub fn total(&self) -> usize {
        self.tests.len()
    }
}
