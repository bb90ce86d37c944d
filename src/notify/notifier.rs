//! 变更通知器
//!
//! 每次账号变更后广播完整账号列表，不做差量。
//! 基于 `tokio::sync::broadcast`，快照以 `Arc` 共享给所有观察者。

use tokio::sync::broadcast::{self, error::RecvError};

use crate::account::types::AccountSnapshot;

/// 全量快照广播器
pub struct ChangeNotifier {
    sender: broadcast::Sender<AccountSnapshot>,
}

impl ChangeNotifier {
    /// 创建通知器，`capacity` 为每个观察者可积压的快照数（最小为 1）
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 向所有观察者发布快照，返回接收者数量
    pub fn publish(&self, snapshot: AccountSnapshot) -> usize {
        // 无观察者时 send 返回 Err，属正常情况
        self.sender.send(snapshot).unwrap_or(0)
    }

    /// 订阅变更，`current` 作为首个推送
    ///
    /// 调用方需保证 `current` 与订阅时刻的存储状态一致。
    pub fn subscribe(&self, current: AccountSnapshot) -> Subscription {
        Subscription {
            initial: Some(current),
            receiver: self.sender.subscribe(),
        }
    }

    /// 当前观察者数量
    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// 单个观察者的订阅
pub struct Subscription {
    initial: Option<AccountSnapshot>,
    receiver: broadcast::Receiver<AccountSnapshot>,
}

impl Subscription {
    /// 下一份快照；通知器销毁后返回 `None`
    ///
    /// 积压过多时跳过中间快照，全量推送保证最终一致。
    pub async fn next(&mut self) -> Option<AccountSnapshot> {
        if let Some(snapshot) = self.initial.take() {
            return Some(snapshot);
        }

        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("观察者落后，跳过 {} 个快照", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
