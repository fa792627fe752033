use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;

/// Resolve the input argument into the list of files to load.
///
/// A directory yields its top-level `*.json` files sorted by path, minus any
/// matching an ignore pattern. Anything else is taken as a single file.
pub fn discover(input: &Path, ignore: &[String]) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let ignore = ignore
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid ignore pattern '{}'", p)))
        .collect::<Result<Vec<_>>>()?;

    let pattern = Pattern::escape(&input.to_string_lossy());
    let pattern = Path::new(&pattern).join("*.json").to_string_lossy().to_string();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)?.flatten() {
        if !entry.is_file() {
            continue;
        }
        let relative = entry.strip_prefix(input).unwrap_or(&entry);
        if ignore
            .iter()
            .any(|p| p.matches_path(&entry) || p.matches_path(relative))
        {
            tracing::debug!("skipping ignored input {}", entry.display());
            continue;
        }
        files.push(entry);
    }
    files.sort();
    Ok(files)
}
