//! 服务错误类型

use axum::http::StatusCode;
use thiserror::Error;

use crate::api::types::ErrorResponse;

/// 账号服务与上传服务的错误
#[derive(Debug, Error)]
pub enum AppError {
    /// 缺少必填字段或请求体无法解析
    #[error("{0}")]
    InvalidInput(String),

    /// 邮箱（归一化后）已存在
    #[error("Account with this email already exists: {0}")]
    Duplicate(String),

    /// 更新目标不存在
    #[error("Account not found: {0}")]
    NotFound(String),

    /// 上传请求中没有 image 文件
    #[error("No file uploaded")]
    MissingFile,

    /// 写入上传目录失败
    #[error("Failed to store uploaded file: {0}")]
    Storage(#[from] std::io::Error),
}

impl AppError {
    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::Duplicate(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 转换为 JSON 错误响应体
    pub fn into_response(self) -> ErrorResponse {
        let message = self.to_string();
        match self {
            Self::InvalidInput(_) | Self::MissingFile => ErrorResponse::invalid_request(message),
            Self::Duplicate(_) => ErrorResponse::conflict(message),
            Self::NotFound(_) => ErrorResponse::not_found(message),
            Self::Storage(_) => ErrorResponse::internal_error(message),
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self::InvalidInput(format!("Invalid account data: missing {}", field))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
