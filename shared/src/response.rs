//! Command endpoint response types
//!
//! All command endpoints answer with this structure; rejected commands
//! (guard not satisfied, malformed input) come back as
//! `{success: false, message}` rather than transport-level failures.
//! Missing resources surface separately as HTTP 404 so callers can
//! distinguish "nothing to act on" from "action rejected".

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::models::OrderItem;

/// Unified command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    /// Updated item, when the command touched exactly one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<OrderItem>,
    /// Error code (only on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl CommandResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            item: None,
            error_code: None,
        }
    }

    pub fn ok_with_item(message: impl Into<String>, item: OrderItem) -> Self {
        Self {
            success: true,
            message: message.into(),
            item: Some(item),
            error_code: None,
        }
    }

    pub fn rejected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            item: None,
            error_code: Some(code),
        }
    }
}
