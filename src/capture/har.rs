//! HAR capture file model

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{HarmockError, Result};

/// 2xx statuses that never carry a response body
const NO_CONTENT_STATUSES: &[i64] = &[204, 205];

/// Resource types recorded for programmatic (non-navigation) requests
const PROGRAMMATIC_RESOURCE_TYPES: &[&str] = &["xhr", "fetch"];

/// One recorded request/response exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedExchange {
    /// Request method as recorded (`GET`)
    pub method: String,
    /// Full request URL
    pub url: String,
    /// Response status code
    pub status: i64,
    /// Browser resource type (`xhr`, `fetch`, `document`, ...)
    pub resource_type: String,
    /// Response body text
    pub response_text: String,
}

impl CapturedExchange {
    /// Whether the browser issued this request programmatically
    #[must_use]
    pub fn is_programmatic(&self) -> bool {
        PROGRAMMATIC_RESOURCE_TYPES
            .iter()
            .any(|kind| self.resource_type.eq_ignore_ascii_case(kind))
    }

    /// Whether the response status is 2xx with a body
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && !NO_CONTENT_STATUSES.contains(&self.status)
    }
}

/// A loaded capture: its well-formed exchanges in recorded order
#[derive(Debug, Clone, Default)]
pub struct Capture {
    /// Exchanges in capture order
    pub exchanges: Vec<CapturedExchange>,
    /// Number of entries that could not be decoded and were dropped
    pub malformed: usize,
}

impl Capture {
    /// Build a capture from already decoded exchanges
    #[must_use]
    pub fn from_exchanges(exchanges: Vec<CapturedExchange>) -> Self {
        Self {
            exchanges,
            malformed: 0,
        }
    }

    /// Load a HAR capture file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a HAR document
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarmockError::CaptureError(format!(
                "Failed to read capture file {}: {e}",
                path.display()
            ))
        })?;

        Self::from_json_str(&content)
    }

    /// Parse a HAR document
    ///
    /// Entries missing a required field are dropped rather than failing the
    /// whole capture.
    ///
    /// # Errors
    ///
    /// Returns error if `json` is not a JSON object shaped like a HAR log
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawHar = serde_json::from_str(json)
            .map_err(|e| HarmockError::CaptureError(format!("Failed to parse capture: {e}")))?;

        let mut capture = Self::default();
        for (index, value) in raw.log.entries.into_iter().enumerate() {
            match RawEntry::deserialize(value) {
                Ok(entry) => capture.exchanges.push(entry.into()),
                Err(e) => {
                    debug!("Dropping malformed capture entry {}: {}", index, e);
                    capture.malformed += 1;
                }
            }
        }

        Ok(capture)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawHar {
    #[serde(default)]
    log: RawLog,
}

#[derive(Debug, Default, Deserialize)]
struct RawLog {
    #[serde(default)]
    entries: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    request: RawRequest,
    response: RawResponse,
    #[serde(rename = "_resourceType", default)]
    resource_type: String,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    method: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    status: i64,
    content: RawContent,
}

#[derive(Debug, Deserialize)]
struct RawContent {
    text: String,
}

impl From<RawEntry> for CapturedExchange {
    fn from(entry: RawEntry) -> Self {
        Self {
            method: entry.request.method,
            url: entry.request.url,
            status: entry.response.status,
            resource_type: entry.resource_type,
            response_text: entry.response.content.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HAR: &str = r#"{
        "log": {
            "version": "1.2",
            "entries": [
                {
                    "_resourceType": "xhr",
                    "request": { "method": "GET", "url": "https://example.com/api/v1/user/list?page=1" },
                    "response": { "status": 200, "content": { "size": 2, "text": "[]" } }
                },
                {
                    "_resourceType": "document",
                    "request": { "method": "GET", "url": "https://example.com/" },
                    "response": { "status": 200, "content": { "text": "<html></html>" } }
                },
                {
                    "_resourceType": "xhr",
                    "request": { "method": "GET", "url": "https://example.com/api/v1/empty" },
                    "response": { "status": 204, "content": {} }
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_entries() {
        let capture = Capture::from_json_str(HAR).unwrap();

        assert_eq!(capture.exchanges.len(), 2);
        assert_eq!(capture.malformed, 1);

        let first = &capture.exchanges[0];
        assert_eq!(first.method, "GET");
        assert_eq!(first.url, "https://example.com/api/v1/user/list?page=1");
        assert_eq!(first.status, 200);
        assert_eq!(first.response_text, "[]");
        assert!(first.is_programmatic());
        assert!(!capture.exchanges[1].is_programmatic());
    }

    #[test]
    fn test_missing_log_is_empty() {
        let capture = Capture::from_json_str("{}").unwrap();
        assert!(capture.exchanges.is_empty());

        let capture = Capture::from_json_str(r#"{"log": {}}"#).unwrap();
        assert!(capture.exchanges.is_empty());
    }

    #[test]
    fn test_not_json_is_error() {
        let result = Capture::from_json_str("not a capture");
        assert!(matches!(result, Err(HarmockError::CaptureError(_))));
    }

    #[test]
    fn test_wrong_field_type_drops_entry_only() {
        let json = r#"{"log": {"entries": [
            {"_resourceType": "xhr", "request": {"method": "GET", "url": "https://a.b/x"},
             "response": {"status": "200", "content": {"text": "{}"}}},
            {"_resourceType": "fetch", "request": {"method": "GET", "url": "https://a.b/y"},
             "response": {"status": 201, "content": {"text": "{}"}}}
        ]}}"#;

        let capture = Capture::from_json_str(json).unwrap();
        assert_eq!(capture.exchanges.len(), 1);
        assert_eq!(capture.malformed, 1);
        assert!(capture.exchanges[0].is_programmatic());
        assert!(capture.exchanges[0].is_success());
    }

    #[test]
    fn test_status_range() {
        let mut exchange = CapturedExchange {
            method: "GET".to_string(),
            url: "https://a.b/".to_string(),
            status: 200,
            resource_type: "XHR".to_string(),
            response_text: String::new(),
        };
        assert!(exchange.is_success());
        assert!(exchange.is_programmatic());

        exchange.status = 299;
        assert!(exchange.is_success());
        exchange.status = 204;
        assert!(!exchange.is_success());
        exchange.status = 205;
        assert!(!exchange.is_success());
        exchange.status = 300;
        assert!(!exchange.is_success());
        exchange.status = 199;
        assert!(!exchange.is_success());
    }

    #[test]
    fn test_no_content_with_text_is_not_success() {
        let json = r#"{"log": {"entries": [
            {"_resourceType": "xhr", "request": {"method": "DELETE", "url": "https://a.b/item/1"},
             "response": {"status": 204, "content": {"size": 0, "text": ""}}}
        ]}}"#;

        let capture = Capture::from_json_str(json).unwrap();
        assert_eq!(capture.exchanges.len(), 1);
        assert!(!capture.exchanges[0].is_success());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HAR.as_bytes()).unwrap();

        let capture = Capture::from_file(file.path()).unwrap();
        assert_eq!(capture.exchanges.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let result = Capture::from_file(Path::new("/nonexistent/capture.har"));
        assert!(matches!(result, Err(HarmockError::CaptureError(_))));
    }
}
