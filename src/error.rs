use std::path::PathBuf;

use thiserror::Error;

/// A syntactically valid document that breaks the session/test shape rules.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("test entry is not an object")]
    TestNotObject,
    #[error("test name is missing")]
    MissingTestName,
    #[error("test name is not a string")]
    TestNameNotString,
    #[error("test name is empty")]
    EmptyTestName,
    #[error("status of test '{test}' is not a string")]
    StatusNotString { test: String },

    #[error("session entry is not an object")]
    SessionNotObject,
    #[error("session dut is missing")]
    MissingDut,
    #[error("session dut is not a string")]
    DutNotString,
    #[error("session dut is empty")]
    EmptyDut,
    #[error("session tests are missing for DUT '{dut}'")]
    MissingTests { dut: String },
    #[error("session tests are not a list for DUT '{dut}'")]
    TestsNotList { dut: String },
    #[error("invalid test #{index} for DUT '{dut}'")]
    InvalidTest {
        dut: String,
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("document must be a session object or a list of sessions, found {found}")]
    UnsupportedDocument { found: &'static str },
}

impl ValidationError {
    /// The innermost validation failure, skipping `InvalidTest` wrappers.
    pub fn root_cause(&self) -> &ValidationError {
        match self {
            ValidationError::InvalidTest { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Failure while loading one of the input paths.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to validate {}", path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
    #[error("load worker for {} did not complete", path.display())]
    Worker {
        path: PathBuf,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Format { path, .. }
            | LoadError::Validation { path, .. }
            | LoadError::Worker { path, .. } => path,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::Format { .. })
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            LoadError::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary")]
    Json(#[from] serde_json::Error),
    #[error("sqlite snapshot failed")]
    Sqlite(#[from] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_nested_test_errors() {
        let err = ValidationError::InvalidTest {
            dut: "DUT_A".into(),
            index: 2,
            source: Box::new(ValidationError::EmptyTestName),
        };
        assert!(matches!(err.root_cause(), ValidationError::EmptyTestName));
        assert_eq!(err.to_string(), "invalid test #2 for DUT 'DUT_A'");
    }
}
