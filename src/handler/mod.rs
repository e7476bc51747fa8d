//! Request handler module
//!
//! Local gateway in front of the resolver: method check, HTTP request to
//! invocation event, invocation response back to HTTP, access logging.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
