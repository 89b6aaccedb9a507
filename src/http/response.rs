//! HTTP response building module
//!
//! Builders for the handful of responses this server emits. Builder errors
//! cannot happen with the fixed headers used here, but the fallbacks keep
//! the serving path panic-free regardless.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 302 Found redirect to `target`.
pub fn build_redirect_response(target: &str) -> Response<Full<Bytes>> {
    let body = format!("Found: {target}\n");
    Response::builder()
        .status(302)
        .header("Location", target)
        .header("Content-Type", "text/plain")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("302", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 HTML response; HEAD requests get the headers without a body.
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 404 Not Found response.
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .header("Content-Length", "13")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    #[test]
    fn test_redirect_response_carries_location() {
        let res = build_redirect_response("https://www.wikipedia.org/");
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get("Location").unwrap(),
            "https://www.wikipedia.org/"
        );
    }

    #[test]
    fn test_html_response_head_has_no_body_but_full_length() {
        let res = build_html_response("<h1>hi</h1>".to_string(), true);
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("Content-Length").unwrap(), "11");
    }
}
