use std::path::{Path, PathBuf};

use futures_util::future::join_all;

use crate::diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
use crate::error::LoadError;
use crate::models::Session;
use crate::validate::validate_document;

/// Sessions and diagnostics produced by [`load_concurrent`].
#[derive(Debug, Default)]
pub struct Loaded {
    pub sessions: Vec<Session>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Load every path in order and concatenate the sessions.
///
/// The first failing path aborts the whole load; nothing from earlier paths is
/// returned. Diagnostics reach `sink` tagged with their source file.
pub fn load<P: AsRef<Path>>(
    paths: &[P],
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Session>, LoadError> {
    let mut sessions = Vec::new();
    for path in paths {
        let path: &Path = path.as_ref();
        let (loaded, diagnostics) = load_file(path)?;
        diagnostics.forward_to(path, sink);
        sessions.extend(loaded);
    }
    Ok(sessions)
}

/// Read, parse and validate a single input file.
pub fn load_file(path: &Path) -> Result<(Vec<Session>, Diagnostics), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text, path)
}

/// Parse and validate document text that was read from `path`.
pub fn parse_document(
    text: &str,
    path: &Path,
) -> Result<(Vec<Session>, Diagnostics), LoadError> {
    let raw: serde_json::Value =
        serde_json::from_str(text).map_err(|source| LoadError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    let mut diagnostics = Diagnostics::new();
    let sessions =
        validate_document(&raw, &mut diagnostics).map_err(|source| LoadError::Validation {
            path: path.to_path_buf(),
            source,
        })?;
    Ok((sessions, diagnostics))
}

/// Like [`load`], but reads and validates each path on its own blocking task.
///
/// Output order matches `paths`. When several paths fail, the error for the
/// lowest index wins.
pub async fn load_concurrent(paths: Vec<PathBuf>) -> Result<Loaded, LoadError> {
    let handles = paths
        .iter()
        .cloned()
        .map(|path| tokio::task::spawn_blocking(move || load_file(&path)));
    let results = join_all(handles).await;

    let mut loaded = Loaded::default();
    for (path, joined) in paths.iter().zip(results) {
        let (sessions, diagnostics) = joined.map_err(|source| LoadError::Worker {
            path: path.clone(),
            source,
        })??;
        loaded.sessions.extend(sessions);
        diagnostics.forward_to(path, &mut loaded.diagnostics);
    }
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn single_object_yields_one_session() {
        let text = r#"{"dut": "DUT_A", "session_id": "s1", "tests": []}"#;
        let (sessions, _) = parse_document(text, Path::new("a.json")).unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn invalid_syntax_is_a_format_error() {
        let err = parse_document("{\"dut\": ", Path::new("broken.json")).unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.path(), Path::new("broken.json"));
    }

    #[test]
    fn out_of_range_duration_is_not_a_format_error() {
        let text = r#"{"dut": "DUT_A", "session_id": "s1", "tests": [
            {"name": "soak", "status": "passed", "duration": 1e400}
        ]}"#;
        let (sessions, diagnostics) = parse_document(text, Path::new("a.json")).unwrap();
        assert_eq!(sessions[0].tests[0].duration, 0.0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.count_of(DiagnosticKind::InvalidDuration), 1);
    }

    #[test]
    fn scalar_document_is_a_validation_error() {
        let err = parse_document("\"hello\"", Path::new("s.json")).unwrap_err();
        assert!(!err.is_format());
        assert!(err.validation().is_some());
    }

    #[test]
    fn empty_path_list_loads_nothing() {
        let mut diagnostics = Diagnostics::new();
        let paths: [&Path; 0] = [];
        assert!(load(&paths, &mut diagnostics).unwrap().is_empty());
    }

    #[test]
    fn diagnostics_carry_the_document_path() {
        let text = r#"{"dut": "DUT_A", "tests": []}"#;
        let (_, diagnostics) = parse_document(text, Path::new("a.json")).unwrap();
        let mut tagged: Vec<Diagnostic> = Vec::new();
        diagnostics.forward_to(Path::new("a.json"), &mut tagged);
        assert_eq!(tagged[0].kind, DiagnosticKind::MissingSessionId);
        assert_eq!(tagged[0].source.as_deref(), Some(Path::new("a.json")));
    }
}
