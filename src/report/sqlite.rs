use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

use super::ReportWriter;
use crate::error::ReportError;
use crate::models::Summary;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS dut_summary (
        dut TEXT PRIMARY KEY,
        passed INTEGER NOT NULL,
        failed INTEGER NOT NULL,
        skipped INTEGER NOT NULL,
        total INTEGER NOT NULL,
        execution_time REAL NOT NULL,
        avg_execution_time REAL NOT NULL,
        pass_rate REAL NOT NULL
    );
    CREATE TABLE IF NOT EXISTS overall_summary (
        id INTEGER PRIMARY KEY,
        total_tests INTEGER NOT NULL,
        passed INTEGER NOT NULL,
        failed INTEGER NOT NULL,
        skipped INTEGER NOT NULL,
        execution_time REAL NOT NULL,
        avg_execution_time REAL NOT NULL,
        pass_rate REAL NOT NULL
    );
";

/// Relational snapshot for dashboards.
///
/// `dut_summary` holds one row per device and is upserted on each run, so
/// devices absent from the current run keep their last known row.
/// `overall_summary` only ever holds the latest run.
pub struct SqliteReport {
    path: PathBuf,
}

impl SqliteReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the snapshot through an already-open connection, in one transaction.
    pub fn write_to(conn: &mut Connection, summary: &Summary) -> Result<(), ReportError> {
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;

        {
            let mut upsert = tx.prepare(
                "INSERT INTO dut_summary
                    (dut, passed, failed, skipped, total, execution_time, avg_execution_time, pass_rate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(dut) DO UPDATE SET
                    passed = excluded.passed,
                    failed = excluded.failed,
                    skipped = excluded.skipped,
                    total = excluded.total,
                    execution_time = excluded.execution_time,
                    avg_execution_time = excluded.avg_execution_time,
                    pass_rate = excluded.pass_rate",
            )?;
            for (dut, stats) in &summary.dut_stats {
                upsert.execute(params![
                    dut,
                    stats.passed as i64,
                    stats.failed as i64,
                    stats.skipped as i64,
                    stats.total as i64,
                    stats.execution_time,
                    stats.average_execution_time,
                    stats.pass_rate,
                ])?;
            }
        }

        let overall = &summary.overall;
        tx.execute("DELETE FROM overall_summary", [])?;
        tx.execute(
            "INSERT INTO overall_summary
                (total_tests, passed, failed, skipped, execution_time, avg_execution_time, pass_rate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                overall.total_tests as i64,
                overall.passed as i64,
                overall.failed as i64,
                overall.skipped as i64,
                overall.execution_time,
                overall.average_execution_time,
                overall.pass_rate,
            ],
        )?;

        tx.commit()?;
        Ok(())
    }
}

impl ReportWriter for SqliteReport {
    fn write(&self, summary: &Summary) -> Result<(), ReportError> {
        let mut conn = Connection::open(&self.path)?;
        Self::write_to(&mut conn, summary)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn name(&self) -> &str {
        "SQLite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DutStats;

    fn summary_with(dut: &str, passed: usize) -> Summary {
        let mut summary = Summary::default();
        summary.dut_stats.insert(
            dut.to_string(),
            DutStats {
                passed,
                total: passed,
                pass_rate: if passed > 0 { 100.0 } else { 0.0 },
                ..Default::default()
            },
        );
        summary.overall.total_tests = passed;
        summary.overall.passed = passed;
        summary
    }

    #[test]
    fn keeps_single_overall_row() {
        let mut conn = Connection::open_in_memory().unwrap();
        SqliteReport::write_to(&mut conn, &summary_with("A", 1)).unwrap();
        SqliteReport::write_to(&mut conn, &summary_with("A", 4)).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM overall_summary", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);

        let total: i64 = conn
            .query_row("SELECT total_tests FROM overall_summary", [], |r| r.get(0))
            .unwrap();
        assert_eq!(total, 4);

        let passed: i64 = conn
            .query_row("SELECT passed FROM dut_summary WHERE dut = 'A'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(passed, 4);
    }

    #[test]
    fn devices_from_earlier_runs_are_kept() {
        let mut conn = Connection::open_in_memory().unwrap();
        SqliteReport::write_to(&mut conn, &summary_with("A", 1)).unwrap();
        SqliteReport::write_to(&mut conn, &summary_with("B", 2)).unwrap();

        let devices: i64 = conn
            .query_row("SELECT COUNT(*) FROM dut_summary", [], |r| r.get(0))
            .unwrap();
        assert_eq!(devices, 2);
    }
}
