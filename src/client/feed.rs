//! Socket.IO 账号列表订阅

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::FutureExt;
use rust_socketio::{
    Payload,
    asynchronous::{Client, ClientBuilder},
};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::account::Account;
use crate::notify::socketio::UPDATE_ACCOUNTS_EVENT;

/// 账号列表实时订阅客户端
#[derive(Clone)]
pub struct AccountFeed {
    server_url: String,
    client: Arc<RwLock<Option<Client>>>,
}

impl AccountFeed {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            client: Arc::new(RwLock::new(None)),
        }
    }

    /// 连接服务端，每收到一次 `updateAccounts` 调用一次 `on_update`
    pub async fn connect<F>(&self, on_update: F) -> Result<()>
    where
        F: Fn(Vec<Account>) + Send + Sync + 'static,
    {
        let on_update = Arc::new(on_update);

        tracing::info!("连接到 Socket.IO 服务器: {}", self.server_url);

        let client = ClientBuilder::new(&self.server_url)
            .on(UPDATE_ACCOUNTS_EVENT, move |payload, _client| {
                let on_update = on_update.clone();
                async move {
                    match payload {
                        Payload::Text(values) => match parse_accounts(&values) {
                            Some(accounts) => on_update(accounts),
                            None => tracing::warn!("无法解析 {} 事件: {:?}", UPDATE_ACCOUNTS_EVENT, values),
                        },
                        _ => {
                            tracing::warn!("收到非预期的 payload 类型");
                        }
                    }
                }
                .boxed()
            })
            .on("error", |payload, _client| {
                async move {
                    tracing::error!("Socket.IO 错误: {:?}", payload);
                }
                .boxed()
            })
            .connect()
            .await
            .context("Socket.IO 连接失败")?;

        *self.client.write().await = Some(client);
        Ok(())
    }

    /// 断开连接
    pub async fn disconnect(&self) -> Result<()> {
        if let Some(client) = self.client.write().await.take() {
            client.disconnect().await?;
            tracing::info!("已断开 Socket.IO 连接");
        }
        Ok(())
    }
}

/// 解析事件参数：单个数组参数，或参数本身即账号列表
fn parse_accounts(values: &[Value]) -> Option<Vec<Account>> {
    if let [Value::Array(_)] = values {
        return serde_json::from_value(values[0].clone()).ok();
    }
    values
        .iter()
        .map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}
