//! 账号 HTTP 客户端
//!
//! 封装服务端四个接口，以及注册、登录、资料修改流程

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use reqwest::{Client, Response, StatusCode, multipart};

use super::validation::{ProfileForm, SignupForm};
use crate::account::{Account, types::normalize_email};
use crate::api::types::{CreateAccountRequest, ErrorResponse, UpdateAccountRequest, UploadImageResponse};

/// 未上传头像时使用的默认图片
pub const DEFAULT_AVATAR_URL: &str =
    "https://static-00.iconduck.com/assets.00/profile-circle-icon-1023x1024-ucnnjrj1.png";

/// 请求超时（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 账号服务客户端
#[derive(Clone)]
pub struct AccountClient {
    /// HTTP 客户端
    client: Client,
    /// 服务器地址
    server_url: String,
}

impl AccountClient {
    /// 创建新的客户端
    pub fn new(server_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .use_rustls_tls()
            .build()
            .context("创建 HTTP 客户端失败")?;

        Ok(Self {
            client,
            server_url: server_url.into().trim_end_matches('/').to_string(),
        })
    }

    // ============ 接口 ============

    /// GET /accounts
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let url = format!("{}/accounts", self.server_url);
        let response = self.client.get(&url).send().await.context("获取账号列表失败")?;
        if !response.status().is_success() {
            return Err(server_error(response, "Could not fetch accounts.").await);
        }
        response.json().await.context("解析账号列表失败")
    }

    /// POST /addAccount
    pub async fn add_account(&self, email: &str, password: &str, image_url: &str) -> Result<()> {
        let url = format!("{}/addAccount", self.server_url);
        let body = CreateAccountRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            image_url: Some(image_url.to_string()),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("创建账号请求失败")?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::CONFLICT => bail!("An account with this email already exists."),
            _ => Err(server_error(response, "Failed to save user. Please try again.").await),
        }
    }

    /// PUT /updateAccount/:email
    pub async fn update_account(&self, email: &str, patch: &UpdateAccountRequest) -> Result<()> {
        let url = format!(
            "{}/updateAccount/{}",
            self.server_url,
            urlencoding::encode(email)
        );

        let response = self
            .client
            .put(&url)
            .json(patch)
            .send()
            .await
            .context("更新账号请求失败")?;

        if !response.status().is_success() {
            return Err(server_error(response, "Could not update user details.").await);
        }
        Ok(())
    }

    /// POST /uploadImage，返回图片 URL
    pub async fn upload_image(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("读取图片失败: {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("profile.jpg")
            .to_string();
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())?;
        let form = multipart::Form::new().part("image", part);

        let url = format!("{}/uploadImage", self.server_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("上传图片请求失败")?;

        if !response.status().is_success() {
            return Err(server_error(response, "Failed to upload the image.").await);
        }
        let body: UploadImageResponse = response.json().await.context("解析上传响应失败")?;
        Ok(body.url)
    }

    // ============ 流程 ============

    /// 注册：校验表单，上传头像（可选），创建账号
    pub async fn signup(&self, form: &SignupForm, image: Option<&Path>) -> Result<Account> {
        form.validate()?;

        let image_url = match image {
            Some(path) => self.upload_image(path).await?,
            None => DEFAULT_AVATAR_URL.to_string(),
        };

        self.add_account(&form.email, &form.password, &image_url).await?;
        tracing::info!("注册成功: {}", form.email);

        Ok(Account {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            image_url,
        })
    }

    /// 登录：在账号列表中查找邮箱（忽略大小写）与密码一致的账号
    pub async fn login(&self, email: &str, password: &str) -> Result<Account> {
        if email.is_empty() || password.is_empty() {
            bail!("Please enter both email and password.");
        }

        let email = normalize_email(email);
        self.list_accounts()
            .await?
            .into_iter()
            .find(|a| normalize_email(&a.email) == email && a.password == password)
            .ok_or_else(|| anyhow!("Incorrect email or password"))
    }

    /// 修改资料：校验密码，上传新头像（可选），提交部分更新
    pub async fn update_profile(
        &self,
        email: &str,
        form: &ProfileForm,
        image: Option<&Path>,
    ) -> Result<()> {
        form.validate()?;

        let new_image_url = match image {
            Some(path) => Some(self.upload_image(path).await?),
            None => None,
        };

        let patch = UpdateAccountRequest {
            new_email: form.new_email.clone(),
            new_password: form.new_password.clone(),
            new_image_url,
        };
        self.update_account(email, &patch).await?;
        tracing::info!("资料已更新: {}", email);
        Ok(())
    }
}

/// 从错误响应中提取服务端消息，缺失时使用 `fallback`
async fn server_error(response: Response, fallback: &str) -> anyhow::Error {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    anyhow!("HTTP {}: {}", status.as_u16(), error_message(&text, fallback))
}

fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error.message;
    }
    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::account::AccountService;
    use crate::api::{AppState, create_router};
    use crate::image_store::ImageStore;
    use crate::notify::ChangeNotifier;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("account-sync-client-{}-{}", uuid::Uuid::new_v4().simple(), name))
    }

    /// 在随机端口启动真实路由，返回服务地址
    async fn spawn_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let images = ImageStore::open(temp_path("uploads"), base_url.clone()).await.unwrap();
        let service = Arc::new(AccountService::new(ChangeNotifier::new(16)));
        let app = create_router(AppState::new(service, images));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        base_url
    }

    fn signup_form(email: &str, password: &str) -> SignupForm {
        SignupForm {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
    }

    #[test]
    fn test_error_message_extraction() {
        let json = r#"{"error":{"type":"not_found","message":"Account not found: a@email.com"}}"#;
        assert_eq!(error_message(json, "fallback"), "Account not found: a@email.com");
        assert_eq!(error_message("plain text", "fallback"), "plain text");
        assert_eq!(error_message("  ", "fallback"), "fallback");
    }

    #[test]
    fn test_server_url_trailing_slash() {
        let client = AccountClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.server_url, "http://127.0.0.1:5000");
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let client = AccountClient::new(spawn_server().await).unwrap();

        let account = client
            .signup(&signup_form("a@email.com", "secret12"), None)
            .await
            .unwrap();
        assert_eq!(account.image_url, DEFAULT_AVATAR_URL);

        let logged_in = client.login("a@email.com", "secret12").await.unwrap();
        assert_eq!(logged_in, account);

        let err = client.login("a@email.com", "wrong-pass").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect email or password");
    }

    #[tokio::test]
    async fn test_login_ignores_email_case() {
        let client = AccountClient::new(spawn_server().await).unwrap();
        let account = client
            .signup(&signup_form("A@email.com", "secret12"), None)
            .await
            .unwrap();

        let logged_in = client.login(" a@EMAIL.com", "secret12").await.unwrap();
        assert_eq!(logged_in, account);
        assert!(client.login("a@email.com", "SECRET12").await.is_err());
    }

    #[tokio::test]
    async fn test_signup_duplicate_and_invalid_form() {
        let client = AccountClient::new(spawn_server().await).unwrap();
        client.signup(&signup_form("a@email.com", "secret12"), None).await.unwrap();

        let err = client
            .signup(&signup_form("A@email.com", "secret12"), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "An account with this email already exists.");

        let err = client
            .signup(&signup_form("b@email.com", "short"), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 7 characters long.");
        assert_eq!(client.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_with_image() {
        let server = spawn_server().await;
        let client = AccountClient::new(server.clone()).unwrap();
        client.signup(&signup_form("a@email.com", "secret12"), None).await.unwrap();

        let image = temp_path("avatar.png");
        tokio::fs::write(&image, b"png-bytes").await.unwrap();

        let form = ProfileForm {
            new_email: Some("renamed@email.com".to_string()),
            ..Default::default()
        };
        client.update_profile("a@email.com", &form, Some(&image)).await.unwrap();

        let accounts = client.list_accounts().await.unwrap();
        assert_eq!(accounts[0].email, "renamed@email.com");
        assert_eq!(accounts[0].password, "secret12");
        assert!(accounts[0].image_url.starts_with(&format!("{}/uploads/", server)));
        assert!(accounts[0].image_url.ends_with(".png"));

        let _ = tokio::fs::remove_file(&image).await;
    }

    #[tokio::test]
    async fn test_update_unknown_account_reports_server_message() {
        let client = AccountClient::new(spawn_server().await).unwrap();

        let patch = UpdateAccountRequest {
            new_password: Some("newpass1".to_string()),
            ..Default::default()
        };
        let err = client.update_account("nobody@email.com", &patch).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404: Account not found: nobody@email.com");
    }
}
