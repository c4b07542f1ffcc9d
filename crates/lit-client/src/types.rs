//! Wire envelopes exchanged with the node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing call: `{"method": .., "params": [payload], "id": ..}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// `Namespace.Verb` procedure name.
    pub method: String,
    /// Single-element parameter list.
    pub params: Vec<Value>,
    /// Correlation id.
    pub id: u64,
}

impl RequestEnvelope {
    /// Wrap `payload` for `method` under `id`.
    pub fn new(method: impl Into<String>, payload: Value, id: u64) -> Self {
        Self {
            method: method.into(),
            params: vec![payload],
            id,
        }
    }
}

/// Incoming reply: `{"id": .., "error": ..|null, "result": ..|null}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Correlation id of the request being answered.
    pub id: u64,
    /// Remote failure, `None` when null or absent.
    #[serde(default)]
    pub error: Option<Value>,
    /// Reply payload, `None` when null or absent.
    #[serde(default)]
    pub result: Option<Value>,
}

impl ResponseEnvelope {
    /// Split into the caller-visible outcome: a non-null `error` wins,
    /// otherwise `result` (null when absent).
    pub fn into_outcome(self) -> std::result::Result<Value, Value> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}
