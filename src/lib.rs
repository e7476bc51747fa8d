//! Static asset resolver
//!
//! Maps an invocation's request path to a file under a fixed static root and
//! shapes the result into an event-style response (base64 body, `Last-Modified`,
//! default `Content-Type` for the index document) or a JSON error response.
//!
//! The binary in `main.rs` exposes the resolver two ways: a local HTTP gateway
//! built on hyper, and a one-shot `invoke` mode that reads an event from stdin.

pub mod config;
pub mod event;
pub mod handler;
pub mod http;
pub mod invoke;
pub mod logger;
pub mod resolver;
pub mod server;

pub use event::{ErrorBody, InvocationRequest, InvocationResponse};
pub use resolver::{AssetSource, IndexDocument, LocalFs, ResolveError, Resolver, SourceError};
