//! Socket.IO 实时通道
//!
//! 每个连接对应一个订阅和一个转发任务，连接断开后任务结束。

use std::sync::Arc;

use socketioxide::{
    SocketIo,
    extract::SocketRef,
    socket::DisconnectReason,
};
use tokio::sync::Notify;

use crate::account::service::AccountService;

/// 推送给客户端的事件名
pub const UPDATE_ACCOUNTS_EVENT: &str = "updateAccounts";

/// 在默认命名空间注册连接处理器
pub fn register(io: &SocketIo, service: Arc<AccountService>) {
    io.ns("/", move |socket: SocketRef| {
        let service = service.clone();
        async move { on_connect(socket, service) }
    });
}

fn on_connect(socket: SocketRef, service: Arc<AccountService>) {
    let mut subscription = service.subscribe();
    tracing::info!("观察者已连接: {}（当前 {} 个）", socket.id, service.observer_count());

    let closed = Arc::new(Notify::new());
    socket.on_disconnect({
        let closed = closed.clone();
        move |socket: SocketRef, reason: DisconnectReason| {
            tracing::info!("观察者已断开: {} ({:?})", socket.id, reason);
            closed.notify_one();
        }
    });

    tokio::spawn(async move {
        loop {
            let snapshot = tokio::select! {
                _ = closed.notified() => break,
                next = subscription.next() => match next {
                    Some(snapshot) => snapshot,
                    None => break,
                },
            };

            if let Err(e) = socket.emit(UPDATE_ACCOUNTS_EVENT, &*snapshot) {
                tracing::debug!("推送 {} 失败，停止转发: {}", socket.id, e);
                break;
            }
            tracing::debug!("已推送 {} 个账号到 {}", snapshot.len(), socket.id);
        }
    });
}
