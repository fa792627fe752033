use std::path::{Path, PathBuf};

use super::{ReportWriter, write_atomic};
use crate::error::ReportError;
use crate::models::Summary;

/// Pretty-printed `{ "overall": ..., "dut_stats": ... }` document.
pub struct JsonReport {
    path: PathBuf,
}

impl JsonReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn render(summary: &Summary) -> Result<String, ReportError> {
        let mut out = serde_json::to_string_pretty(summary)?;
        out.push('\n');
        Ok(out)
    }
}

impl ReportWriter for JsonReport {
    fn write(&self, summary: &Summary) -> Result<(), ReportError> {
        let rendered = Self::render(summary)?;
        write_atomic(&self.path, rendered.as_bytes())
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn name(&self) -> &str {
        "JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DutStats;

    #[test]
    fn renders_both_sections() {
        let mut summary = Summary::default();
        summary.overall.total_tests = 2;
        summary.dut_stats.insert(
            "DUT_A".into(),
            DutStats {
                passed: 2,
                total: 2,
                pass_rate: 100.0,
                ..Default::default()
            },
        );

        let rendered = JsonReport::render(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["overall"]["total_tests"], 2);
        assert_eq!(value["dut_stats"]["DUT_A"]["pass_rate"], 100.0);
        assert!(rendered.contains("\n  \"overall\""));
    }
}
