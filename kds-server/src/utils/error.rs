//! 统一错误处理
//!
//! 提供应用级错误类型和 HTTP 响应映射：
//! - [`AppError`] - 应用错误枚举
//!
//! Command-boundary policy: a missing resource surfaces as a transport-level
//! 404 so callers can distinguish "nothing to act on" from "action
//! rejected"; guard failures are converted by the handlers into structured
//! `{success: false, message}` bodies and never reach `IntoResponse` here.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::ErrorCode;
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 业务逻辑错误 (4xx) ==========
    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 操作前置条件不满足 (422)
    #[error("{message}")]
    Precondition { code: ErrorCode, message: String },

    /// 验证失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    // ========== 系统错误 (5xx) ==========
    /// 订单存储错误 (500)
    #[error("Store error: {0}")]
    Store(String),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(format!("{} not found", resource.into()))
    }

    pub fn precondition(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Precondition {
            code,
            message: message.into(),
        }
    }

    /// The error code this variant maps to on the wire
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Precondition { code, .. } => *code,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Store(_) | Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

/// Error response body
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Resource not found: order o1"
/// }
/// ```
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.http_status();

        let message = match &self {
            // System errors hide detail from clients but log it
            AppError::Store(msg) => {
                error!(target: "store", error = %msg, "Store error occurred");
                "Store error".to_string()
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<crate::store::StoreError> for AppError {
    fn from(e: crate::store::StoreError) -> Self {
        AppError::Store(e.to_string())
    }
}
