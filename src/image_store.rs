//! 上传图片存储模块
//!
//! 将上传的图片写入本地目录，通过 `/uploads` 静态路径对外提供。
//! 文件名由 UTC 时间戳加随机 UUID 组成，并发上传不会冲突。

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;

/// 静态文件路由前缀
pub const UPLOADS_ROUTE: &str = "/uploads";

/// 扩展名最大长度
const MAX_EXTENSION_LEN: usize = 10;

/// 已保存的图片
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub filename: String,
    pub path: PathBuf,
    pub url: String,
}

/// 图片存储
pub struct ImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    /// 打开存储目录（不存在时创建）
    pub async fn open(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 存储目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 保存图片并返回可访问的 URL
    pub async fn save(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredImage> {
        let filename = generate_filename(image_extension(original_name, content_type).as_deref());
        let path = self.root.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        tracing::info!("已保存上传图片: {}（{} 字节）", path.display(), bytes.len());
        Ok(StoredImage {
            url: self.url_for(&filename),
            filename,
            path,
        })
    }

    /// 文件名对应的公开 URL
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}{}/{}", self.public_base_url, UPLOADS_ROUTE, filename)
    }
}

/// 推断扩展名：优先原始文件名，其次 MIME 类型
fn image_extension(original_name: Option<&str>, content_type: Option<&str>) -> Option<String> {
    let from_name = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .and_then(sanitize_extension);
    if from_name.is_some() {
        return from_name;
    }

    content_type
        .and_then(mime_guess::get_mime_extensions_str)
        .and_then(|exts| exts.first())
        .and_then(|ext| sanitize_extension(ext))
}

fn sanitize_extension(ext: &str) -> Option<String> {
    if ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn generate_filename(extension: Option<&str>) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
    let id = Uuid::new_v4().simple();
    match extension {
        Some(ext) => format!("{}-{}.{}", stamp, id, ext),
        None => format!("{}-{}", stamp, id),
    }
}
