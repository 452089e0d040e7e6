//! Response classification.
//!
//! An HTTP exchange ends in one of three shapes: a usable `result`, a server
//! supplied `error`, or something that is neither. [`ResponseBody::classify`]
//! makes that decision once, from the raw JSON, so the client never inspects
//! fields ad hoc.

use serde_json::Value;

use crate::types::JsonRpcError;

/// Which `result` members count as a successful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPolicy {
    /// Only a truthy `result` is a success. `null`, `false`, `0` and `""`
    /// are treated exactly like a missing member.
    #[default]
    Truthy,
    /// Any `result` member that is present is a success, whatever its value.
    Present,
}

impl std::str::FromStr for ResultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truthy" => Ok(ResultPolicy::Truthy),
            "present" => Ok(ResultPolicy::Present),
            other => Err(format!(
                "Unknown result policy '{}', expected 'truthy' or 'present'",
                other
            )),
        }
    }
}

/// The decoded meaning of a 200 response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Success(Value),
    Failure(JsonRpcError),
    Malformed,
}

impl ResponseBody {
    /// Decode a response body. `None` means the payload was not JSON at all.
    pub fn classify(body: Option<&Value>, policy: ResultPolicy) -> Self {
        let Some(Value::Object(fields)) = body else {
            return ResponseBody::Malformed;
        };

        let has_result = match (fields.get("result"), policy) {
            (Some(result), ResultPolicy::Truthy) => is_truthy(result),
            // `"result": null` is present
            (Some(_), ResultPolicy::Present) => true,
            (None, _) => false,
        };
        if has_result {
            return ResponseBody::Success(fields["result"].clone());
        }

        match fields.get("error") {
            Some(error) if is_truthy(error) => {
                ResponseBody::Failure(JsonRpcError::from_value(error.clone()))
            }
            _ => ResponseBody::Malformed,
        }
    }

    /// Turn the classification into the value a call resolves with.
    pub fn into_outcome(self, status: u16) -> Result<Value, JsonRpcError> {
        match self {
            ResponseBody::Success(result) => Ok(result),
            ResponseBody::Failure(err) => Err(err),
            ResponseBody::Malformed => Err(JsonRpcError::invalid_response(status)),
        }
    }
}

/// JavaScript truthiness of a JSON value. Objects and arrays are truthy even
/// when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
