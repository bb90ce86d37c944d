//! 客户端模块
//!
//! 移动端各页面对应的流程：注册、登录、资料修改，以及账号列表实时订阅

pub mod account_client;
pub mod feed;
pub mod validation;

pub use account_client::AccountClient;
pub use feed::AccountFeed;
pub use validation::{ProfileForm, SignupForm};
