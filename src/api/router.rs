//! HTTP API 路由配置

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use super::handlers::{add_account, list_accounts, update_account, upload_image};
use crate::account::AccountService;
use crate::image_store::{ImageStore, UPLOADS_ROUTE};

/// API 共享状态
#[derive(Clone)]
pub struct AppState {
    /// 账号服务
    pub service: Arc<AccountService>,
    /// 上传图片存储
    pub images: Arc<ImageStore>,
    /// 上传请求体上限（字节）
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(service: Arc<AccountService>, images: ImageStore) -> Self {
        Self {
            service,
            images: Arc::new(images),
            max_upload_bytes: crate::model::config::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }
}

/// 创建 HTTP 路由
///
/// # 端点
/// - `POST /addAccount` - 创建账号
/// - `POST /uploadImage` - 上传头像（multipart，字段 `image`）
/// - `GET /accounts` - 获取全部账号
/// - `PUT /updateAccount/{email}` - 部分更新账号
/// - `GET /uploads/{file}` - 已上传图片
pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.images.root());

    Router::new()
        .route("/addAccount", post(add_account))
        .route(
            "/uploadImage",
            post(upload_image).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route("/accounts", get(list_accounts))
        .route("/updateAccount/{email}", put(update_account))
        .nest_service(UPLOADS_ROUTE, uploads)
        .with_state(state)
}
