//! One-shot invocation
//!
//! Reads a JSON event, resolves it, and returns the JSON response the way an
//! event-driven host would hand it back.

use thiserror::Error;

use crate::event::InvocationRequest;
use crate::resolver::{AssetSource, Resolver};

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Malformed invocation event: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to encode invocation response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Resolve a JSON-encoded [`InvocationRequest`] into a JSON-encoded response
///
/// Only a malformed event is an error; resolution failures are encoded as
/// 404/500 responses.
pub async fn invoke_json<S: AssetSource>(
    resolver: &Resolver<S>,
    input: &str,
) -> Result<String, InvokeError> {
    let request: InvocationRequest = serde_json::from_str(input).map_err(InvokeError::Parse)?;
    let response = resolver.resolve(&request).await;
    serde_json::to_string(&response).map_err(InvokeError::Encode)
}
