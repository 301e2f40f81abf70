//! Error types for the record handler

use thiserror::Error;

/// Errors that can occur while handling an invocation
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The request body is not a usable record payload
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MalformedPayload(_) => 400,
            HandlerError::StorageError(_) | HandlerError::Internal(_) => 500,
        }
    }

    /// Whether the caller, rather than the function, is at fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Convert to a Response
    pub fn to_response(&self) -> crate::Response {
        if self.is_client_error() {
            crate::Response::bad_request(self.to_string())
        } else {
            crate::Response::internal_error(self.to_string())
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::MalformedPayload(format!("invalid JSON: {}", err))
    }
}

impl From<HandlerError> for crate::Response {
    fn from(err: HandlerError) -> Self {
        err.to_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HandlerError::MalformedPayload("x".into()).status_code(), 400);
        assert_eq!(HandlerError::StorageError("x".into()).status_code(), 500);
        assert_eq!(HandlerError::Internal("x".into()).status_code(), 500);
        assert!(HandlerError::MalformedPayload("x".into()).is_client_error());
        assert!(!HandlerError::StorageError("x".into()).is_client_error());
    }

    #[test]
    fn test_error_response_body() {
        let response: crate::Response = HandlerError::StorageError("table gone".into()).into();
        assert_eq!(response.status, 500);
        assert_eq!(response.header("content-type").map(String::as_str), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(response.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["error"], "Storage error: table gone");
    }

    #[test]
    fn test_json_error_is_malformed_payload() {
        let err: HandlerError = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err().into();
        assert!(matches!(err, HandlerError::MalformedPayload(_)));
        assert!(err.to_string().starts_with("Malformed payload: invalid JSON"));
    }
}
