//! HTTP API 类型定义

use serde::{Deserialize, Serialize};

use crate::account::AccountPatch;
use crate::account::types::present;
use crate::error::{AppError, Result};

// ============ 请求 ============

/// 创建账号请求（字段缺失或为空均视为无效）
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateAccountRequest {
    /// 校验必填字段，返回 (email, password, imageUrl)
    pub fn into_parts(self) -> Result<(String, String, String)> {
        let email = present(self.email.as_deref().map(str::trim))
            .ok_or_else(|| AppError::missing_field("email"))?
            .to_string();
        let password = present(self.password.as_deref())
            .ok_or_else(|| AppError::missing_field("password"))?
            .to_string();
        let image_url = present(self.image_url.as_deref())
            .ok_or_else(|| AppError::missing_field("imageUrl"))?
            .to_string();
        Ok((email, password, image_url))
    }
}

/// 更新账号请求（所有字段可选）
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_image_url: Option<String>,
}

impl From<UpdateAccountRequest> for AccountPatch {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            email: req.new_email,
            password: req.new_password,
            image_url: req.new_image_url,
        }
    }
}

// ============ 响应 ============

/// 图片上传响应
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub url: String,
}

/// 操作成功响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                error_type: error_type.into(),
                message: message.into(),
            },
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("invalid_request", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("conflict", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_all_fields() {
        let req: CreateAccountRequest =
            serde_json::from_str(r#"{"email":"a@email.com","password":"secret1"}"#).unwrap();
        let err = req.into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Invalid account data: missing imageUrl");

        let req: CreateAccountRequest =
            serde_json::from_str(r#"{"email":"  ","password":"p","imageUrl":"i"}"#).unwrap();
        assert!(matches!(req.into_parts(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_create_request_into_parts() {
        let req: CreateAccountRequest =
            serde_json::from_str(r#"{"email":" A@Email.com","password":"secret1","imageUrl":"img1"}"#)
                .unwrap();
        let (email, password, image_url) = req.into_parts().unwrap();
        assert_eq!(email, "A@Email.com");
        assert_eq!(password, "secret1");
        assert_eq!(image_url, "img1");
    }

    #[test]
    fn test_update_request_into_patch() {
        let req: UpdateAccountRequest = serde_json::from_str(r#"{"newPassword":"newpass1"}"#).unwrap();
        let patch = AccountPatch::from(req);
        assert_eq!(patch.password.as_deref(), Some("newpass1"));
        assert!(patch.email.is_none());
        assert!(patch.image_url.is_none());
    }
}
