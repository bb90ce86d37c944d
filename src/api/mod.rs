//! HTTP API 模块
//!
//! 账号的创建、查询、更新接口，以及头像上传和静态图片服务。

mod handlers;
pub mod router;
pub mod types;

pub use router::{AppState, create_router};
