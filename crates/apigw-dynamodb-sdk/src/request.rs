//! HTTP Request representation for the handler

use std::collections::HashMap;

/// Represents an incoming HTTP request, detached from the hosting runtime
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: String,

    /// Request path (e.g., "/items")
    pub path: String,

    /// HTTP headers
    pub headers: HashMap<String, String>,

    /// Request body, `None` when the event carried no body
    pub body: Option<String>,

    /// Client IP address
    pub client_ip: Option<String>,

    /// Client user agent
    pub user_agent: Option<String>,

    /// Request ID for tracing
    pub request_id: String,
}

impl Request {
    /// Create a request with the given method and path and no body.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a header (builder pattern).
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Whether the request carries a body with at least one byte.
    ///
    /// A zero-length body is treated the same as no body at all.
    pub fn has_body(&self) -> bool {
        self.body.as_deref().is_some_and(|b| !b.is_empty())
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Client IP for diagnostics, `"unknown"` when the platform did not supply one.
    pub fn source_ip(&self) -> &str {
        self.client_ip.as_deref().unwrap_or("unknown")
    }

    /// User agent for diagnostics, `"unknown"` when the platform did not supply one.
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or("unknown")
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            headers: HashMap::new(),
            body: None,
            client_ip: None,
            user_agent: None,
            request_id: String::new(),
        }
    }
}
