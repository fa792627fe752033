use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// An absent optional field was filled with its default.
    Info,
    /// A present value was unusable and got replaced.
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    MissingStatus,
    UnknownStatus,
    MissingDuration,
    InvalidDuration,
    NegativeDuration,
    MissingSessionId,
}

impl DiagnosticKind {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            DiagnosticKind::MissingStatus | DiagnosticKind::MissingDuration => {
                DiagnosticLevel::Info
            }
            DiagnosticKind::UnknownStatus
            | DiagnosticKind::InvalidDuration
            | DiagnosticKind::NegativeDuration
            | DiagnosticKind::MissingSessionId => DiagnosticLevel::Warning,
        }
    }
}

/// A recoverable irregularity found while validating input.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Input file the diagnostic came from, filled in by the loader.
    pub source: Option<PathBuf>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn level(&self) -> DiagnosticLevel {
        self.kind.level()
    }

    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(path) => write!(f, "{}: {}", path.display(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Receiver for diagnostics emitted by the validators.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in emission order.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.level() == DiagnosticLevel::Warning)
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Forward every collected diagnostic to another sink, tagging each with `path`.
    pub fn forward_to(self, path: &Path, sink: &mut dyn DiagnosticSink) {
        for diagnostic in self.entries {
            sink.emit(diagnostic.with_source(path));
        }
    }
}

impl DiagnosticSink for Diagnostics {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing`, keeping a count of warnings.
#[derive(Debug, Default)]
pub struct LogSink {
    warnings: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level() {
            DiagnosticLevel::Info => tracing::debug!("{}", diagnostic),
            DiagnosticLevel::Warning => {
                self.warnings += 1;
                tracing::warn!("{}", diagnostic);
            }
        }
    }
}
