use std::path::{Path, PathBuf};

use super::{ReportWriter, write_atomic};
use crate::error::ReportError;
use crate::models::Summary;

const HEADER: [&str; 8] = [
    "DUT",
    "passed",
    "failed",
    "skipped",
    "total",
    "pass_rate (%)",
    "execution_time",
    "average_execution_time",
];

/// One row per device plus a trailing `ALL` row with the overall totals.
pub struct CsvReport {
    path: PathBuf,
}

impl CsvReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn render(summary: &Summary) -> String {
        let mut out = String::new();
        push_row(&mut out, HEADER.iter().map(|h| h.to_string()));

        for (dut, stats) in &summary.dut_stats {
            push_row(
                &mut out,
                [
                    dut.clone(),
                    stats.passed.to_string(),
                    stats.failed.to_string(),
                    stats.skipped.to_string(),
                    stats.total.to_string(),
                    format!("{:.2}", stats.pass_rate),
                    format!("{:.2}", stats.execution_time),
                    format!("{:.2}", stats.average_execution_time),
                ],
            );
        }

        let overall = &summary.overall;
        push_row(
            &mut out,
            [
                "ALL".to_string(),
                overall.passed.to_string(),
                overall.failed.to_string(),
                overall.skipped.to_string(),
                overall.total_tests.to_string(),
                format!("{:.2}", overall.pass_rate),
                format!("{:.2}", overall.execution_time),
                format!("{:.2}", overall.average_execution_time),
            ],
        );
        out
    }
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let row: Vec<String> = fields.into_iter().map(|f| escape(&f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl ReportWriter for CsvReport {
    fn write(&self, summary: &Summary) -> Result<(), ReportError> {
        write_atomic(&self.path, Self::render(summary).as_bytes())
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn name(&self) -> &str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DutStats;

    #[test]
    fn renders_device_rows_and_overall_row() {
        let mut summary = Summary::default();
        summary.dut_stats.insert(
            "DUT_A".into(),
            DutStats {
                passed: 2,
                failed: 1,
                skipped: 0,
                total: 3,
                execution_time: 6.0,
                average_execution_time: 2.0,
                pass_rate: 200.0 / 3.0,
            },
        );
        summary.overall.total_tests = 3;
        summary.overall.passed = 2;
        summary.overall.failed = 1;
        summary.overall.execution_time = 6.0;
        summary.overall.average_execution_time = 2.0;
        summary.overall.pass_rate = 200.0 / 3.0;

        let rendered = CsvReport::render(&summary);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(
            lines,
            [
                "DUT,passed,failed,skipped,total,pass_rate (%),execution_time,average_execution_time",
                "DUT_A,2,1,0,3,66.67,6.00,2.00",
                "ALL,2,1,0,3,66.67,6.00,2.00",
            ]
        );
    }

    #[test]
    fn quotes_fields_with_separators() {
        assert_eq!(escape("rack 1, slot 2"), "\"rack 1, slot 2\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("plain"), "plain");
    }
}
