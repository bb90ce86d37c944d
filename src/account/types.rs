//! 账号数据模型

use serde::{Deserialize, Serialize};

/// 账号记录
///
/// 密码以明文保存和传输，这是演示系统的已知缺陷。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// 邮箱（保留原始大小写，已去除首尾空白）
    pub email: String,
    /// 密码（明文）
    pub password: String,
    /// 头像 URL
    pub image_url: String,
}

impl Account {
    /// 归一化后的邮箱，用于唯一性比较
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// 部分更新：仅非空字段会覆盖旧值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub image_url: Option<String>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        present(self.email.as_deref()).is_none()
            && present(self.password.as_deref()).is_none()
            && present(self.image_url.as_deref()).is_none()
    }
}

/// 邮箱归一化：去除首尾空白并转小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 空字符串视同未提供
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// 账号列表快照（广播时在观察者之间共享）
pub type AccountSnapshot = std::sync::Arc<Vec<Account>>;
