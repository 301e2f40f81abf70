//! HTTP Response representation for the handler

use serde::Serialize;
use std::collections::HashMap;

/// Represents an outgoing HTTP response.
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `ok(body)` | 200 | Record written |
/// | `bad_request(msg)` | 400 | Malformed payload |
/// | `internal_error(msg)` | 500 | Store or runtime failure |
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Option<String>,
}

impl Response {
    /// Create a new response with the given status code (no body).
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a 200 OK response with JSON body.
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(json!({"message": "Successfully inserted data!"}))
    /// ```
    pub fn ok<T: Serialize>(body: T) -> Self {
        Self::json(200, body)
    }

    /// Create a JSON response with a custom status code.
    pub fn json<T: Serialize>(status: u16, body: T) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            status,
            headers,
            body: serde_json::to_string(&body).ok(),
        }
    }

    /// Create a 200 OK response carrying `{"message": ...}`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok(serde_json::json!({"message": message.into()}))
    }

    /// Create a 400 Bad Request response.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::json(400, serde_json::json!({"error": message.into()}))
    }

    /// Create a 500 Internal Server Error response.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::json(500, serde_json::json!({"error": message.into()}))
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}
