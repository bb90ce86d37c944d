//! 账号变更通知模块
//!
//! 全量快照广播，以及将其桥接到 Socket.IO 客户端的实时通道

pub mod notifier;
pub mod socketio;

pub use notifier::{ChangeNotifier, Subscription};
