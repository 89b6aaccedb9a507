//! Request handler chain module
//!
//! Handlers are modeled as an explicit variant type rather than nested
//! closures: a delegating redirect handler wraps a [`PathMap`] and its
//! fallback, terminal handlers serve content directly. Fallback chains are
//! singly-linked `Arc` lists ending in a terminal variant, so several
//! chains may share one terminal instance.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::http;

use super::map::PathMap;

/// A request handler: either redirects mapped paths and delegates the rest,
/// or serves content directly.
#[derive(Debug, Clone)]
pub enum RequestHandler {
    /// Redirect paths found in `map`, delegate everything else to `fallback`.
    Redirect {
        map: PathMap,
        fallback: Arc<RequestHandler>,
    },
    /// Terminal: serve a fixed HTML page with status 200.
    Page { html: String },
    /// Terminal: plain 404 for everything.
    NotFound,
}

impl RequestHandler {
    /// Handle a request.
    ///
    /// A mapped path yields `302 Found` with the destination URL in
    /// `Location`; the fallback is not consulted. Any other path is
    /// delegated to the fallback unchanged (method, headers and body
    /// untouched). Lookup cannot fail and no I/O happens here, so handling
    /// has no error path.
    pub fn handle<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        match self {
            Self::Redirect { map, fallback } => match map.lookup(req.uri().path()) {
                Some(dest) => http::build_redirect_response(dest),
                None => fallback.handle(req),
            },
            Self::Page { html } => {
                http::build_html_response(html.clone(), *req.method() == Method::HEAD)
            }
            Self::NotFound => http::build_404_response(),
        }
    }
}
