//! 注册与资料修改表单校验

use thiserror::Error;

use crate::account::types::present;

/// 注册邮箱必须包含的域名
pub const REQUIRED_EMAIL_DOMAIN: &str = "@email.com";

/// 密码最短长度
pub const MIN_PASSWORD_LEN: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("All fields are required.")]
    MissingField,
    #[error("Email must include '@email.com'.")]
    InvalidEmail,
    #[error("Password must be at least 7 characters long.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// 注册表单
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(FormError::MissingField);
        }
        if !self.email.contains(REQUIRED_EMAIL_DOMAIN) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

/// 资料修改表单（仅填写需要修改的字段）
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub new_email: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl ProfileForm {
    /// 填写了新密码时必须与确认密码一致，空字符串视为未填写
    pub fn validate(&self) -> Result<(), FormError> {
        if let Some(password) = present(self.new_password.as_deref()) {
            if self.confirm_password.as_deref() != Some(password) {
                return Err(FormError::PasswordMismatch);
            }
        }
        Ok(())
    }
}
