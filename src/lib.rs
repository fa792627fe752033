//! Validate per-device test session records and aggregate them into
//! pass/fail/skip summaries.

pub mod aggregate;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod discover;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod validate;

pub use aggregate::summarize;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Diagnostics, LogSink};
pub use error::{LoadError, ReportError, ValidationError};
pub use loader::{load, load_concurrent};
pub use models::{Session, Summary, TestCase, TestStatus};
pub use validate::{validate_session, validate_test};
