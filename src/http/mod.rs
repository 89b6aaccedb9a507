//! HTTP protocol layer module
//!
//! Response builders shared by the handler chain, decoupled from business
//! logic.

pub mod response;

pub use response::{build_404_response, build_html_response, build_redirect_response};
