//! Invocation contract
//!
//! JSON shapes exchanged with an event-driven host: a request carrying at
//! least a `path`, and a response with `statusCode`, `headers`, `body` and
//! `isBase64Encoded`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::resolver::ResolveError;

/// Inbound request; fields other than `path` are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvocationRequest {
    pub path: String,
}

impl InvocationRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Outbound response, success or error
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub body: String,
    /// Absent on the wire means false
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_base64_encoded: bool,
}

/// JSON body of an error response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl InvocationResponse {
    /// 200 response carrying `bytes` base64-encoded (standard alphabet, padded)
    pub fn success(headers: BTreeMap<String, String>, bytes: &[u8]) -> Self {
        Self {
            status_code: 200,
            headers,
            body: STANDARD.encode(bytes),
            is_base64_encoded: true,
        }
    }

    /// Error response with a `{"message": ...}` body and no headers
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        let body = ErrorBody {
            message: message.into(),
        };
        let body = serde_json::to_string(&body)
            .unwrap_or_else(|_| String::from(r#"{"message":"internal error"}"#));

        Self {
            status_code,
            headers: BTreeMap::new(),
            body,
            is_base64_encoded: false,
        }
    }

    pub fn from_error(err: &ResolveError) -> Self {
        Self::error(err.status_code(), err.to_string())
    }

    /// Raw body bytes, undoing the transport encoding if present
    pub fn decode_body(&self) -> Result<Vec<u8>, base64::DecodeError> {
        if self.is_base64_encoded {
            STANDARD.decode(&self.body)
        } else {
            Ok(self.body.as_bytes().to_vec())
        }
    }

    /// Parsed error body, if this is an error response
    pub fn error_body(&self) -> Option<ErrorBody> {
        if self.is_base64_encoded {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
