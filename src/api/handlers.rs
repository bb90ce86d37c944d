//! HTTP 请求处理器

use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{
    router::AppState,
    types::{CreateAccountRequest, SuccessResponse, UpdateAccountRequest, UploadImageResponse},
};
use crate::error::AppError;

/// 上传表单中的文件字段名
pub const IMAGE_FIELD: &str = "image";

/// POST /addAccount
/// 创建账号，成功后广播账号列表
pub async fn add_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(e) => return error_response(AppError::InvalidInput(e.body_text())),
    };

    let (email, password, image_url) = match payload.into_parts() {
        Ok(parts) => parts,
        Err(e) => return error_response(e),
    };

    match state.service.create_account(&email, &password, &image_url) {
        Ok(_) => (
            StatusCode::CREATED,
            Json(SuccessResponse::new("Account added successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /accounts
/// 返回全部账号
pub async fn list_accounts(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.list_accounts())
}

/// PUT /updateAccount/:email
/// 部分更新账号，成功后广播账号列表
pub async fn update_account(
    State(state): State<AppState>,
    Path(email): Path<String>,
    payload: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(e) => return error_response(AppError::InvalidInput(e.body_text())),
    };

    match state.service.update_account(&email, payload.into()) {
        Ok(_) => Json(SuccessResponse::new("Account updated successfully")).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /uploadImage
/// 保存 multipart 中的 image 字段，返回图片 URL
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    let Ok(mut multipart) = multipart else {
        return error_response(AppError::MissingFile);
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return error_response(AppError::MissingFile),
            Err(e) => {
                return (e.status(), Json(AppError::InvalidInput(e.body_text()).into_response()))
                    .into_response();
            }
        };

        // 仅接受带文件名的文件字段，同名的普通文本字段忽略
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content_type = field.content_type().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return (e.status(), Json(AppError::InvalidInput(e.body_text()).into_response()))
                    .into_response();
            }
        };

        return match state
            .images
            .save(Some(&file_name), content_type.as_deref(), &bytes)
            .await
        {
            Ok(stored) => {
                tracing::debug!("上传完成: {} -> {}", stored.filename, stored.path.display());
                Json(UploadImageResponse { url: stored.url }).into_response()
            }
            Err(e) => {
                tracing::error!("保存上传图片失败: {}", e);
                error_response(e)
            }
        };
    }
}

fn error_response(e: AppError) -> Response {
    (e.status_code(), Json(e.into_response())).into_response()
}
