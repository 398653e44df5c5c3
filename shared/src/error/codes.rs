//! Error code definitions
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order/item errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility (Rust, TypeScript display clients).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed (malformed status/category input)
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Operation guard not satisfied
    PreconditionFailed = 4,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Completion attempted while items are still outstanding
    OrderItemsNotDone = 4003,
    /// Order item not found
    OrderItemNotFound = 4101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::PreconditionFailed => "Precondition failed",
            Self::OrderNotFound => "Order not found",
            Self::OrderEmpty => "Order has no items",
            Self::OrderItemsNotDone => "Not all items completed",
            Self::OrderItemNotFound => "Order item not found",
            Self::InternalError => "Internal server error",
        }
    }

    /// Whether this code represents a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::OrderNotFound | Self::OrderItemNotFound
        )
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::PreconditionFailed),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderEmpty),
            4003 => Ok(Self::OrderItemsNotDone),
            4101 => Ok(Self::OrderItemNotFound),
            9001 => Ok(Self::InternalError),
            _ => Err(format!("Unknown error code: {value}")),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", *self as u16)
    }
}
