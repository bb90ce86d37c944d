//! 账号服务
//!
//! 持锁组合存储与通知器：变更与广播在同一临界区内完成，
//! 广播顺序与变更顺序一致。

use std::sync::Arc;

use parking_lot::Mutex;

use super::store::AccountStore;
use super::types::{Account, AccountPatch, AccountSnapshot};
use crate::error::Result;
use crate::notify::{ChangeNotifier, Subscription};

/// 账号服务（注入到 HTTP 处理器和实时通道）
pub struct AccountService {
    store: Mutex<AccountStore>,
    notifier: ChangeNotifier,
}

impl AccountService {
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self {
            store: Mutex::new(AccountStore::new()),
            notifier,
        }
    }

    /// 创建账号并广播
    pub fn create_account(&self, email: &str, password: &str, image_url: &str) -> Result<Account> {
        let mut store = self.store.lock();
        let account = store.create(email, password, image_url).inspect_err(|e| {
            tracing::warn!("账号创建被拒绝: {}", e);
        })?;

        let receivers = self.notifier.publish(snapshot_of(&store));
        tracing::info!(
            "新账号已添加: {}（共 {} 个账号，通知 {} 个观察者）",
            account.email,
            store.len(),
            receivers
        );
        Ok(account)
    }

    /// 全部账号
    pub fn list_accounts(&self) -> Vec<Account> {
        self.store.lock().list().to_vec()
    }

    /// 部分更新账号并广播
    pub fn update_account(&self, email: &str, patch: AccountPatch) -> Result<Account> {
        if patch.is_empty() {
            tracing::debug!("空更新: {}", email);
        }

        let mut store = self.store.lock();
        let account = store.update(email, patch).inspect_err(|e| {
            tracing::warn!("账号更新被拒绝: {}", e);
        })?;

        let receivers = self.notifier.publish(snapshot_of(&store));
        tracing::info!("账号已更新: {} -> {}（通知 {} 个观察者）", email, account.email, receivers);
        Ok(account)
    }

    /// 订阅账号列表变更
    ///
    /// 首个推送为当前列表，之后每次变更推送一次。
    pub fn subscribe(&self) -> Subscription {
        let store = self.store.lock();
        self.notifier.subscribe(snapshot_of(&store))
    }

    pub fn observer_count(&self) -> usize {
        self.notifier.observer_count()
    }
}

fn snapshot_of(store: &AccountStore) -> AccountSnapshot {
    Arc::new(store.list().to_vec())
}
