//! 账号模块
//!
//! 内存账号存储，以及组合存储与变更通知的账号服务

pub mod service;
pub mod store;
pub mod types;

pub use service::AccountService;
pub use types::{Account, AccountPatch};
