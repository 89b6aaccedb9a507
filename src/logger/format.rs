//! Access log format module
//!
//! Supported formats:
//! - `combined` (common fields plus redirect target and timing)
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)

use chrono::Local;

/// Access log entry containing request and response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Redirect destination, when the response was a redirect
    pub location: Option<String>,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with the current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            location: None,
            body_bytes: 0,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format.
    /// Unknown format names fall back to `combined`.
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    /// Common Log Format plus redirect target and timing
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent "$location" $request_time_us`
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" {}us",
            self.format_common(),
            self.location.as_deref().unwrap_or("-"),
            self.request_time_us,
        )
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}{} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.query
                .as_ref()
                .map(|q| format!("?{q}"))
                .unwrap_or_default(),
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        // Manual JSON building; the shape is fixed
        let query_json = self
            .query
            .as_ref()
            .map_or_else(|| "null".to_string(), |q| format!("\"{}\"", escape_json(q)));
        let location_json = self
            .location
            .as_ref()
            .map_or_else(|| "null".to_string(), |l| format!("\"{}\"", escape_json(l)));

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","query":{},"http_version":"{}","status":{},"location":{},"body_bytes":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            query_json,
            escape_json(&self.http_version),
            self.status,
            location_json,
            self.body_bytes,
            self.request_time_us,
        )
    }
}

/// Escape special characters for a JSON string
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "GET".to_string(),
            "/wiki".to_string(),
        );
        entry.http_version = "1.1".to_string();
        entry.status = 302;
        entry.location = Some("https://www.wikipedia.org/".to_string());
        entry.body_bytes = 34;
        entry.request_time_us = 120;
        entry
    }

    #[test]
    fn test_format_combined() {
        let entry = create_test_entry();
        let log = entry.format("combined");
        assert!(log.contains("192.168.1.1"));
        assert!(log.contains("GET /wiki HTTP/1.1"));
        assert!(log.contains("302 34"));
        assert!(log.contains("\"https://www.wikipedia.org/\""));
        assert!(log.contains("120us"));
    }

    #[test]
    fn test_format_common_omits_location() {
        let entry = create_test_entry();
        let log = entry.format("common");
        assert!(log.contains("GET /wiki HTTP/1.1"));
        assert!(log.contains("302 34"));
        assert!(!log.contains("wikipedia"));
    }

    #[test]
    fn test_format_json() {
        let entry = create_test_entry();
        let log = entry.format("json");
        assert!(log.contains(r#""remote_addr":"192.168.1.1""#));
        assert!(log.contains(r#""status":302"#));
        assert!(log.contains(r#""location":"https://www.wikipedia.org/""#));
    }

    #[test]
    fn test_unknown_format_falls_back_to_combined() {
        let entry = create_test_entry();
        assert_eq!(entry.format("nonsense"), entry.format("combined"));
    }

    #[test]
    fn test_format_with_query_string() {
        let mut entry = create_test_entry();
        entry.query = Some("ref=mail".to_string());
        let log = entry.format("common");
        assert!(log.contains("GET /wiki?ref=mail HTTP/1.1"));
    }
}
