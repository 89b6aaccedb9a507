//! Request handler module
//!
//! Entry point dispatching every inbound request to the redirect handler
//! chain and recording access log entries.

mod router;

pub use router::handle_request;
