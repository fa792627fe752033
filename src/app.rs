use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;
use crate::discover::discover;
use crate::report::{CsvReport, JsonReport, ReportWriter, SqliteReport};
use crate::{DiagnosticSink, LoadError, LogSink, Session, Summary};

#[derive(Debug, Parser)]
#[command(name = "dut-report", version, about = "QA test reporting for devices under test")]
pub struct Cli {
    /// Folder containing JSON test session files or a single JSON file
    #[arg(long)]
    pub input: PathBuf,

    /// Output JSON file path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Output CSV file path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Also write a SQLite snapshot to this path
    #[arg(long)]
    pub sqlite: Option<PathBuf>,

    /// Config file to use instead of ./dut-report.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read and validate input files in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// What a run ended with. Reports exist on disk only for `Written`.
#[derive(Debug)]
pub enum RunOutcome {
    NoInputs,
    NoSessions,
    Written {
        summary: Summary,
        sessions: usize,
        /// Writer name and destination, in write order.
        outputs: Vec<(String, PathBuf)>,
    },
}

/// Discover, load, summarize and write. Relative paths resolve against `workspace`.
pub async fn run(cli: Cli, workspace: &Path) -> Result<RunOutcome> {
    let config = match &cli.config {
        Some(path) => Config::load_file(&workspace.join(path))?,
        None => Config::load(workspace),
    };

    let input = workspace.join(&cli.input);
    let files = discover(&input, &config.discovery.ignore)?;
    if files.is_empty() {
        tracing::info!("No JSON files found in {}", input.display());
        return Ok(RunOutcome::NoInputs);
    }
    tracing::debug!("loading {} input file(s)", files.len());

    let mut sink = LogSink::new();
    let sessions = load_sessions(files, cli.parallel || config.load.parallel, &mut sink)
        .await
        .context("error loading sessions")?;
    if sink.warnings() > 0 {
        tracing::warn!("{} irregular value(s) recovered during validation", sink.warnings());
    }
    if sessions.is_empty() {
        tracing::info!("No sessions loaded from the JSON files");
        return Ok(RunOutcome::NoSessions);
    }

    let summary = crate::summarize(&sessions);

    let json = cli.json.unwrap_or(config.output.json);
    let csv = cli.csv.unwrap_or(config.output.csv);
    let mut writers: Vec<Box<dyn ReportWriter>> = vec![
        Box::new(JsonReport::new(workspace.join(json))),
        Box::new(CsvReport::new(workspace.join(csv))),
    ];
    if let Some(path) = cli.sqlite.or(config.output.sqlite) {
        writers.push(Box::new(SqliteReport::new(workspace.join(path))));
    }

    for writer in &writers {
        writer
            .write(&summary)
            .with_context(|| format!("failed to write {} report", writer.name()))?;
    }

    Ok(RunOutcome::Written {
        summary,
        sessions: sessions.len(),
        outputs: writers
            .iter()
            .map(|w| (w.name().to_string(), w.path().to_path_buf()))
            .collect(),
    })
}

async fn load_sessions(
    files: Vec<PathBuf>,
    parallel: bool,
    sink: &mut LogSink,
) -> Result<Vec<Session>, LoadError> {
    if parallel {
        let loaded = crate::load_concurrent(files).await?;
        for diagnostic in loaded.diagnostics {
            sink.emit(diagnostic);
        }
        Ok(loaded.sessions)
    } else {
        crate::load(&files, sink)
    }
}
