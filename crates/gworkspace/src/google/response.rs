//! Response Normalization
//!
//! Every call, successful or not, paginated or not, comes back as one
//! `ResponseEnvelope`.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::request::Method;
use super::transport::RawResponse;
use crate::common::WorkspaceError;

/// HTTP status with its classification flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseStatus {
    pub code: u16,
    /// Exactly 200; a 204 is successful but not ok
    pub ok: bool,
    pub successful: bool,
    pub failed: bool,
    pub server_error: bool,
    pub client_error: bool,
}

impl ResponseStatus {
    pub fn from_code(code: u16) -> Self {
        let successful = (200..300).contains(&code);
        Self {
            code,
            ok: code == 200,
            successful,
            failed: !successful,
            server_error: (500..600).contains(&code),
            client_error: (400..500).contains(&code),
        }
    }
}

/// Uniform result of every API call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Header name to its values joined by a single space
    pub headers: BTreeMap<String, String>,
    /// Body as received, or the re-serialized paginated aggregate
    pub raw_body: String,
    /// Parsed body, or the paginated aggregate; `None` for empty bodies
    pub object: Option<Value>,
    pub status: ResponseStatus,
}

impl ResponseEnvelope {
    /// Field from the parsed body
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.object.as_ref().and_then(|o| o.get(field))
    }

    /// Extract an array field, returning an empty vec if missing.
    ///
    /// Google APIs return lists under varying field names ("users", "groups",
    /// "messages", "items").
    pub fn array(&self, field: &str) -> Vec<Value> {
        self.get(field)
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default()
    }

    /// Human-readable error description from a failed response body
    pub fn error_message(&self) -> Option<String> {
        // Google APIs return errors in one of these shapes:
        //   { "error": "invalid_grant", "error_description": "..." }
        //   { "error": { "code": 404, "message": "...", "errors": [...] } }
        if let Some(desc) = self.get("error_description").and_then(|v| v.as_str()) {
            return Some(desc.to_string());
        }
        match self.get("error") {
            Some(Value::Object(err)) => err
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            Some(Value::String(err)) => Some(err.clone()),
            _ => None,
        }
    }

    /// Turn a failed envelope into `WorkspaceError::Api`.
    pub fn error_for_status(self, method: Method) -> Result<Self, WorkspaceError> {
        if self.status.successful {
            return Ok(self);
        }

        let message = self.error_message().unwrap_or_else(|| {
            format!("{} request failed with status {}", method, self.status.code)
        });
        Err(WorkspaceError::Api {
            code: self.status.code,
            message,
        })
    }
}

/// Convert a raw response into an envelope.
///
/// `paginated` carries the merged aggregate when the response was paginated;
/// it then replaces both the parsed object and the raw body.
pub fn normalize(raw: &RawResponse, paginated: Option<Value>) -> ResponseEnvelope {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in &raw.headers {
        headers
            .entry(name.clone())
            .and_modify(|joined| {
                joined.push(' ');
                joined.push_str(value);
            })
            .or_insert_with(|| value.clone());
    }

    let (raw_body, object) = match paginated {
        Some(aggregate) => (aggregate.to_string(), Some(aggregate)),
        None => (raw.body.clone(), raw.parsed_body()),
    };

    ResponseEnvelope {
        headers,
        raw_body,
        object,
        status: ResponseStatus::from_code(raw.status),
    }
}
