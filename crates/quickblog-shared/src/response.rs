//! Standardized API response envelopes.

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
///
/// The payload is flattened into the envelope, so `ApiResponse::ok(PostList {..})`
/// serializes as `{"success":true,"blogs":[...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// Payload for responses that carry only a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok_with_message(Empty {}, message)
    }
}

/// Error body: `{"success":false,"error":"...","status":404}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// A human-readable explanation specific to this occurrence.
    pub error: String,

    /// The HTTP status code.
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            status,
        }
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Invalid credentials")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(404, detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::TitleAvailability;

    #[test]
    fn payload_is_flattened() {
        let json = serde_json::to_value(ApiResponse::ok(TitleAvailability { available: true }))
            .unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "available": true}));
    }

    #[test]
    fn message_only_response() {
        let json = serde_json::to_value(ApiResponse::message("Blog deleted successfully")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Blog deleted successfully"})
        );
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_value(ErrorResponse::not_found("Blog not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Blog not found", "status": 404})
        );
        assert_eq!(ErrorResponse::conflict("taken").status, 409);
    }
}
