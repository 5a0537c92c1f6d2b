//! Response Envelope
//!
//! Every endpoint answers with the same outer shape.
//!
//! ```json
//! {"success": true, "message": "Success", "data": {}}
//! {"success": false, "error": {"code": "NOT_FOUND", "message": "Activity not found"}}
//! ```

use serde::{Deserialize, Serialize};

/// Default message of a successful response
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Successful response wrapping `data`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` with the default message
    pub fn ok(data: T) -> Self {
        Self::with_message(data, DEFAULT_SUCCESS_MESSAGE)
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Machine-readable code plus human-readable message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Failed response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
