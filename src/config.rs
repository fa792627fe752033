use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "dut-report.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

/// Controls which input files are skipped when the input is a directory.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoveryConfig {
    /// Glob patterns matched against each candidate path.
    /// Example: ["**/draft-*.json", "runs/legacy/*"]
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Default destinations for the reports.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_json")]
    pub json: PathBuf,
    #[serde(default = "default_csv")]
    pub csv: PathBuf,
    /// SQLite snapshot; skipped when unset.
    pub sqlite: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: default_json(),
            csv: default_csv(),
            sqlite: None,
        }
    }
}

fn default_json() -> PathBuf {
    PathBuf::from("summary.json")
}

fn default_csv() -> PathBuf {
    PathBuf::from("summary.csv")
}

#[derive(Debug, Default, Deserialize)]
pub struct LoadConfig {
    /// Read and validate input files on worker tasks.
    #[serde(default)]
    pub parallel: bool,
}

impl Config {
    /// Load `dut-report.toml` from `dir`, falling back to defaults if absent or invalid.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Load a config file the user named explicitly. Unlike [`Config::load`],
    /// a missing or malformed file is an error.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path());
        assert_eq!(config.output.json, PathBuf::from("summary.json"));
        assert_eq!(config.output.csv, PathBuf::from("summary.csv"));
        assert!(config.output.sqlite.is_none());
        assert!(!config.load.parallel);
        assert!(config.discovery.ignore.is_empty());
    }

    #[test]
    fn reads_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[discovery]
ignore = ["**/draft-*.json"]

[output]
csv = "out/report.csv"
sqlite = "out/report.db"

[load]
parallel = true
"#,
        )
        .unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.discovery.ignore, ["**/draft-*.json"]);
        assert_eq!(config.output.json, PathBuf::from("summary.json"));
        assert_eq!(config.output.csv, PathBuf::from("out/report.csv"));
        assert_eq!(config.output.sqlite, Some(PathBuf::from("out/report.db")));
        assert!(config.load.parallel);
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[load]\nparallel = \"yes\"").unwrap();
        assert!(!Config::load(dir.path()).load.parallel);
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[load]\nparallel = true").unwrap();
        assert!(Config::load_file(&path).unwrap().load.parallel);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn explicit_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[load]\nparallel = \"yes\"").unwrap();
        assert!(Config::load_file(&path).is_err());
    }
}
