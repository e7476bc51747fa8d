//! Request routing dispatch module
//!
//! Entry point for HTTP request processing on the local gateway.

use crate::config::AppState;
use crate::event::InvocationRequest;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::event::InvocationResponse;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let is_head = method == Method::HEAD;

    let response = match check_http_method(&method) {
        Some(resp) => resp,
        None => {
            let invocation = match decode_path(req.uri().path()) {
                Some(path) => state.resolver.resolve(&InvocationRequest::new(path)).await,
                None => {
                    logger::log_warning(&format!(
                        "Request path is not valid UTF-8: {}",
                        req.uri().path()
                    ));
                    InvocationResponse::error(404, format!("File not found: {}", req.uri().path()))
                }
            };
            http::build_gateway_response(&invocation, is_head)
        }
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            req.uri().path().to_string(),
        );
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = if is_head {
            0
        } else {
            response
                .headers()
                .get("content-length")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(0)
        };
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Percent-decode a URI path the way an event host delivers it
///
/// Decoding happens before normalization, so `%2e%2e` and `%2F` are still
/// collapsed and refused by the resolver.
fn decode_path(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Non-GET/HEAD methods never reach the resolver
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
