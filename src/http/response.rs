//! HTTP response building module
//!
//! The resolver speaks the invocation contract; these builders translate it
//! to real HTTP for the local gateway.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::event::InvocationResponse;

/// Build the wire response for a resolver result
///
/// Base64 bodies are decoded. Error bodies without a `Content-Type` are sent
/// as JSON. For HEAD the body is dropped but `Content-Length` is kept.
pub fn build_gateway_response(
    invocation: &InvocationResponse,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let data = match invocation.decode_body() {
        Ok(data) => data,
        Err(e) => {
            crate::logger::log_error(&format!("Invalid base64 body from resolver: {e}"));
            return build_500_response("Invalid response body");
        }
    };

    let mut builder = Response::builder().status(invocation.status_code);
    for (name, value) in &invocation.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if !invocation.is_base64_encoded && invocation.header("Content-Type").is_none() {
        builder = builder.header("Content-Type", "application/json");
    }

    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    builder
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(&invocation.status_code.to_string(), &e);
            build_500_response("Failed to build response")
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 response with the same JSON error body the resolver uses
pub fn build_500_response(message: &str) -> Response<Full<Bytes>> {
    let body = InvocationResponse::error(500, message).body;
    Response::builder()
        .status(500)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::collections::BTreeMap;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());
        headers.insert(
            "Last-Modified".to_string(),
            "Sun, 06 Nov 1994 08:49:37 GMT".to_string(),
        );
        let invocation = InvocationResponse::success(headers, b"<p>hi</p>");

        let resp = build_gateway_response(&invocation, false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(
            resp.headers()["last-modified"],
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
        assert_eq!(resp.headers()["content-length"], "9");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"<p>hi</p>"));
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let invocation = InvocationResponse::error(404, "File not found: /x");
        let resp = build_gateway_response(&invocation, false);
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(
            body_bytes(resp).await,
            Bytes::from_static(br#"{"message":"File not found: /x"}"#)
        );
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let invocation = InvocationResponse::success(BTreeMap::new(), b"12345");
        let resp = build_gateway_response(&invocation, true);
        assert_eq!(resp.headers()["content-length"], "5");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_base64_is_500() {
        let mut invocation = InvocationResponse::success(BTreeMap::new(), b"x");
        invocation.body = "***".to_string();
        let resp = build_gateway_response(&invocation, false);
        assert_eq!(resp.status(), 500);
    }

    #[test]
    fn test_method_responses() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], "GET, HEAD, OPTIONS");

        let resp = build_options_response();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["allow"], "GET, HEAD, OPTIONS");
    }
}
