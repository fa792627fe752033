use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dut_report::app::{Cli, RunOutcome, run};
use dut_report::{Summary, TestStatus};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if let RunOutcome::Written {
        summary,
        sessions,
        outputs,
    } = run(cli, &workspace).await?
    {
        println!("Summary saved successfully!");
        for (name, path) in &outputs {
            println!("   {:<6} -> {}", name, path.display());
        }
        println!("{}", status_line(&summary, sessions));
    }

    Ok(())
}

fn status_line(summary: &Summary, sessions: usize) -> String {
    let overall = &summary.overall;
    format!(
        "{} sessions, {} DUTs  {} {}  {} {}  {} {}  {:.2}% pass  {:.2}s",
        sessions,
        summary.dut_stats.len(),
        TestStatus::Passed.icon(),
        overall.passed,
        TestStatus::Failed.icon(),
        overall.failed,
        TestStatus::Skipped.icon(),
        overall.skipped,
        overall.pass_rate,
        overall.execution_time,
    )
}
