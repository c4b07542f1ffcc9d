//! Per-command reply checks.
//!
//! The node signals success in several ad-hoc ways: the presence of a reply
//! field, a `Success` flag, or a human-readable `Status` string with a known
//! prefix. Each command names the convention it relies on with a
//! [`ReplyCheck`], keeping those literals out of the transport.

use serde_json::Value;

use crate::errors::{ClientError, Result};

/// How a command decides whether the node's reply means success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyCheck {
    /// Accept any reply.
    Any,
    /// The reply object must contain this field (null is allowed).
    Field(&'static str),
    /// The reply object must contain every one of these fields.
    Fields(&'static [&'static str]),
    /// `Status` must be a string starting with this prefix.
    StatusPrefix(&'static str),
    /// `Status` must be exactly this string.
    StatusEquals(&'static str),
    /// `Success` must be present and `true`.
    Success,
}

impl ReplyCheck {
    /// Apply the check to a raw reply.
    pub fn check(self, reply: &Value) -> Result<()> {
        match self {
            Self::Any => Ok(()),
            Self::Field(name) => {
                if reply.get(name).is_some() {
                    Ok(())
                } else {
                    Err(unexpected(reply))
                }
            }
            Self::Fields(names) => {
                if names.iter().all(|name| reply.get(name).is_some()) {
                    Ok(())
                } else {
                    Err(unexpected(reply))
                }
            }
            Self::StatusPrefix(prefix) => match status(reply) {
                Some(text) if text.starts_with(prefix) => Ok(()),
                other => Err(unexpected_status(other)),
            },
            Self::StatusEquals(expected) => match status(reply) {
                Some(text) if text == expected => Ok(()),
                other => Err(unexpected_status(other)),
            },
            Self::Success => match reply.get("Success").and_then(Value::as_bool) {
                Some(true) => Ok(()),
                Some(false) => Err(ClientError::Rejected(reply.to_string())),
                None => Err(unexpected(reply)),
            },
        }
    }
}

fn status(reply: &Value) -> Option<&str> {
    reply.get("Status").and_then(Value::as_str)
}

fn unexpected(reply: &Value) -> ClientError {
    ClientError::UnexpectedReply(reply.to_string())
}

fn unexpected_status(status: Option<&str>) -> ClientError {
    ClientError::UnexpectedReply(status.unwrap_or("undefined").to_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
