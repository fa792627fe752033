use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::ValidationError;
use crate::models::{TestCase, TestStatus};

/// Normalize one raw test entry.
///
/// Missing or unknown statuses become `skipped`; missing, unparseable or
/// negative durations become `0.0`. Each substitution is reported to `sink`.
pub fn validate_test(
    raw: &Value,
    sink: &mut dyn DiagnosticSink,
) -> Result<TestCase, ValidationError> {
    let obj = raw.as_object().ok_or(ValidationError::TestNotObject)?;

    let name = match obj.get("name") {
        None | Some(Value::Null) => return Err(ValidationError::MissingTestName),
        Some(Value::String(name)) => name,
        Some(_) => return Err(ValidationError::TestNameNotString),
    };
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyTestName);
    }

    let status = match obj.get("status") {
        None => {
            sink.emit(Diagnostic::new(
                DiagnosticKind::MissingStatus,
                format!("Missing status for test '{}'. Using 'skipped'", name),
            ));
            TestStatus::Skipped
        }
        Some(Value::String(raw_status)) => match TestStatus::parse(raw_status) {
            Some(status) => status,
            None => {
                sink.emit(Diagnostic::new(
                    DiagnosticKind::UnknownStatus,
                    format!(
                        "Unknown test status '{}' for test '{}'. Using 'skipped'",
                        raw_status.to_lowercase(),
                        name
                    ),
                ));
                TestStatus::Skipped
            }
        },
        Some(_) => {
            return Err(ValidationError::StatusNotString { test: name.clone() });
        }
    };

    let duration = match obj.get("duration") {
        None => {
            sink.emit(Diagnostic::new(
                DiagnosticKind::MissingDuration,
                format!("Missing duration for test '{}'. Using 0.0", name),
            ));
            0.0
        }
        Some(raw_duration) => match coerce_duration(raw_duration) {
            Some(d) if d < 0.0 => {
                sink.emit(Diagnostic::new(
                    DiagnosticKind::NegativeDuration,
                    format!("Negative duration {} for test '{}'. Using 0.0", d, name),
                ));
                0.0
            }
            // abs() folds -0.0 into 0.0
            Some(d) => d.abs(),
            None => {
                sink.emit(Diagnostic::new(
                    DiagnosticKind::InvalidDuration,
                    format!("Invalid duration {} for test '{}'. Using 0.0", raw_duration, name),
                ));
                0.0
            }
        },
    };

    Ok(TestCase {
        name: name.clone(),
        status,
        duration,
    })
}

/// Convert a raw duration to a finite float.
///
/// Numbers are taken as-is, strings are trimmed and parsed, booleans map to
/// 1.0 / 0.0. Anything else, or a non-finite result, yields `None`.
pub fn coerce_duration(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    value.is_finite().then_some(value)
}
