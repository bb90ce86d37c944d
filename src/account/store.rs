//! 账号存储
//!
//! 进程内的账号列表，按插入顺序保存。唯一性以归一化邮箱为准，
//! 创建与更新使用同一套查找规则。

use super::types::{Account, AccountPatch, normalize_email, present};
use crate::error::{AppError, Result};

/// 内存账号存储
///
/// 本身不做同步，由 `AccountService` 持锁访问。
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建账号
    ///
    /// 邮箱去除首尾空白后保存，大小写保持原样。
    pub fn create(&mut self, email: &str, password: &str, image_url: &str) -> Result<Account> {
        let email = email.trim();
        if self.position(email).is_some() {
            return Err(AppError::Duplicate(email.to_string()));
        }

        let account = Account {
            email: email.to_string(),
            password: password.to_string(),
            image_url: image_url.to_string(),
        };
        self.accounts.push(account.clone());
        Ok(account)
    }

    /// 全部账号（插入顺序）
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    /// 部分更新账号
    ///
    /// 新邮箱若与其他账号冲突则整体失败，存储保持不变。
    pub fn update(&mut self, email: &str, patch: AccountPatch) -> Result<Account> {
        let index = self
            .position(email)
            .ok_or_else(|| AppError::NotFound(email.trim().to_string()))?;

        let new_email = present(patch.email.as_deref().map(str::trim));
        if let Some(new_email) = new_email {
            if let Some(other) = self.position(new_email) {
                if other != index {
                    return Err(AppError::Duplicate(new_email.to_string()));
                }
            }
        }

        let entry = &mut self.accounts[index];
        if let Some(e) = new_email {
            entry.email = e.to_string();
        }
        if let Some(p) = present(patch.password.as_deref()) {
            entry.password = p.to_string();
        }
        if let Some(u) = present(patch.image_url.as_deref()) {
            entry.image_url = u.to_string();
        }

        Ok(entry.clone())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    fn position(&self, email: &str) -> Option<usize> {
        let key = normalize_email(email);
        self.accounts.iter().position(|a| a.normalized_email() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> AccountStore {
        let mut store = AccountStore::new();
        store.create("A@Email.com", "secret1", "img1").unwrap();
        store
    }

    #[test]
    fn test_create_then_list() {
        let store = seeded();
        assert_eq!(
            store.list(),
            &[Account {
                email: "A@Email.com".to_string(),
                password: "secret1".to_string(),
                image_url: "img1".to_string(),
            }]
        );
    }

    #[test]
    fn test_create_trims_email_but_keeps_case() {
        let mut store = AccountStore::new();
        let account = store.create("  Mixed@Email.com ", "secret1", "img").unwrap();
        assert_eq!(account.email, "Mixed@Email.com");
    }

    #[test]
    fn test_create_duplicate_normalized_email() {
        let mut store = seeded();
        let err = store.create(" a@email.com", "other12", "img2").unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].password, "secret1");
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut store = AccountStore::new();
        store.create("c@email.com", "p", "i").unwrap();
        store.create("a@email.com", "p", "i").unwrap();
        store.create("b@email.com", "p", "i").unwrap();
        let emails: Vec<_> = store.list().iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, vec!["c@email.com", "a@email.com", "b@email.com"]);
    }

    #[test]
    fn test_update_password_only() {
        let mut store = seeded();
        let patch = AccountPatch {
            password: Some("newpass1".to_string()),
            ..Default::default()
        };
        let updated = store.update("A@Email.com", patch).unwrap();
        assert_eq!(updated.password, "newpass1");
        assert_eq!(updated.email, "A@Email.com");
        assert_eq!(updated.image_url, "img1");
        assert_eq!(store.list()[0], updated);
    }

    #[test]
    fn test_update_email_only_keeps_other_fields() {
        let mut store = seeded();
        let patch = AccountPatch {
            email: Some("b@email.com".to_string()),
            ..Default::default()
        };
        let updated = store.update("A@Email.com", patch).unwrap();
        assert_eq!(updated.email, "b@email.com");
        assert_eq!(updated.password, "secret1");
        assert_eq!(updated.image_url, "img1");
    }

    #[test]
    fn test_update_empty_fields_are_ignored() {
        let mut store = seeded();
        let patch = AccountPatch {
            email: Some("   ".to_string()),
            password: Some(String::new()),
            image_url: None,
        };
        let updated = store.update("A@Email.com", patch).unwrap();
        assert_eq!(&updated, &store.list()[0]);
        assert_eq!(updated.email, "A@Email.com");
        assert_eq!(updated.password, "secret1");
    }

    #[test]
    fn test_update_lookup_is_normalized() {
        let mut store = seeded();
        let patch = AccountPatch {
            image_url: Some("img2".to_string()),
            ..Default::default()
        };
        let updated = store.update(" a@EMAIL.com", patch).unwrap();
        assert_eq!(updated.image_url, "img2");
    }

    #[test]
    fn test_update_unknown_email() {
        let mut store = seeded();
        let patch = AccountPatch {
            password: Some("x".to_string()),
            ..Default::default()
        };
        let err = store.update("missing@email.com", patch).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.list()[0].password, "secret1");
    }

    #[test]
    fn test_update_to_taken_email_is_rejected() {
        let mut store = seeded();
        store.create("b@email.com", "secret2", "img2").unwrap();
        let patch = AccountPatch {
            email: Some("A@email.COM".to_string()),
            password: Some("changed".to_string()),
            ..Default::default()
        };
        let err = store.update("b@email.com", patch).unwrap_err();
        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(store.list()[1].password, "secret2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_own_email_recased() {
        let mut store = seeded();
        let patch = AccountPatch {
            email: Some("a@email.com".to_string()),
            ..Default::default()
        };
        let updated = store.update("A@Email.com", patch).unwrap();
        assert_eq!(updated.email, "a@email.com");
        assert_eq!(store.len(), 1);
    }
}
