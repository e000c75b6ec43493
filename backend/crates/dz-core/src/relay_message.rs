use serde_json::{Map, Value};

/// One inbound event, as decoded from a broker record or an ingestion request.
///
/// Fields are kept raw; presence and shape are judged by the [`Router`](crate::Router).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelayMessage {
    pub demozone: Option<String>,
    pub eventname: Option<String>,
    pub payload: Option<Value>,
}

impl RelayMessage {
    pub fn new(demozone: &str, eventname: &str, payload: Value) -> Self {
        Self {
            demozone: Some(demozone.to_string()),
            eventname: Some(eventname.to_string()),
            payload: Some(payload),
        }
    }

    /// Build a message from a decoded JSON document.
    ///
    /// Non-object documents yield an empty message. `demozone` and `eventname`
    /// are only taken when they are JSON strings.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        Self {
            demozone: take_string(&mut fields, "demozone"),
            eventname: take_string(&mut fields, "eventname"),
            payload: fields.remove("payload"),
        }
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are absent values.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
