pub mod record;
pub mod session;

pub use record::{coerce_duration, validate_test};
pub use session::{validate_document, validate_session};

use serde_json::Value;

/// Short JSON type name used in error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
