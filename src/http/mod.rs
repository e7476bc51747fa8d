//! HTTP protocol layer module
//!
//! Date formatting for response headers and builders that turn resolver
//! output into hyper responses for the local gateway.

pub mod date;
pub mod response;

pub use response::{
    build_405_response, build_500_response, build_gateway_response, build_options_response,
};
