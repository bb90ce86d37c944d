use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 上传请求体默认上限（10 MiB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// 服务端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// 图片 URL 的公开前缀（例如：http://192.168.1.10:5000），未配置时回退到本机地址
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,

    /// 上传图片保存目录
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// 上传请求体上限（字节）
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// 每个观察者可积压的快照数
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,

    /// 日志文件目录（可选，按天滚动）
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// 配置文件路径（运行时元数据，不写入 JSON）
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_broadcast_capacity() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_base_url: None,
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            broadcast_capacity: default_broadcast_capacity(),
            log_dir: None,
            config_path: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 获取有效的公开 URL 前缀
    /// 优先使用 public_base_url，未配置时回退到 http://127.0.0.1:port
    pub fn effective_public_base_url(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://127.0.0.1:{}", self.port),
        }
    }

    /// 监听地址
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            let mut config = Self::default();
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// 获取配置文件路径（如果有）
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
