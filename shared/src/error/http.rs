//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::OrderItemNotFound => {
                StatusCode::NOT_FOUND
            }

            // 400 Bad Request
            Self::ValidationFailed => StatusCode::BAD_REQUEST,

            // 422 Unprocessable Entity
            Self::PreconditionFailed | Self::OrderEmpty | Self::OrderItemsNotDone => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
