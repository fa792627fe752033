use serde_json::Value;

use super::json_kind;
use super::record::validate_test;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::ValidationError;
use crate::models::Session;

/// Normalize one raw session. A single invalid test rejects the whole session.
///
/// A non-string `session_id` is kept as its JSON text: `42` becomes `"42"`,
/// `true` becomes `"true"` and `[1,2]` becomes `"[1,2]"`.
pub fn validate_session(
    raw: &Value,
    sink: &mut dyn DiagnosticSink,
) -> Result<Session, ValidationError> {
    let obj = raw.as_object().ok_or(ValidationError::SessionNotObject)?;

    let dut = match obj.get("dut") {
        None | Some(Value::Null) => return Err(ValidationError::MissingDut),
        Some(Value::String(dut)) => dut,
        Some(_) => return Err(ValidationError::DutNotString),
    };
    if dut.trim().is_empty() {
        return Err(ValidationError::EmptyDut);
    }

    let session_id = match obj.get("session_id") {
        None | Some(Value::Null) => {
            sink.emit(Diagnostic::new(
                DiagnosticKind::MissingSessionId,
                format!("session_id missing for DUT '{}'. Using empty string", dut),
            ));
            String::new()
        }
        Some(Value::String(id)) => id.clone(),
        // Numbers and booleans keep their JSON spelling.
        Some(other) => other.to_string(),
    };

    let raw_tests = match obj.get("tests") {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingTests { dut: dut.clone() });
        }
        Some(Value::Array(tests)) => tests,
        Some(_) => return Err(ValidationError::TestsNotList { dut: dut.clone() }),
    };

    let tests = raw_tests
        .iter()
        .enumerate()
        .map(|(index, raw_test)| {
            validate_test(raw_test, sink).map_err(|e| ValidationError::InvalidTest {
                dut: dut.clone(),
                index,
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Session {
        dut: dut.clone(),
        session_id,
        tests,
    })
}

/// Validate a whole parsed document: either one session object or a list of them.
pub fn validate_document(
    raw: &Value,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Session>, ValidationError> {
    match raw {
        Value::Object(_) => Ok(vec![validate_session(raw, sink)?]),
        Value::Array(items) => items
            .iter()
            .map(|item| validate_session(item, sink))
            .collect(),
        other => Err(ValidationError::UnsupportedDocument {
            found: json_kind(other),
        }),
    }
}
