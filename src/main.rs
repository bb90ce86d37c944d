mod account;
mod api;
mod client;
mod error;
mod image_store;
mod logging;
mod model;
mod notify;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use socketioxide::SocketIo;
use tower_http::cors::CorsLayer;

use account::AccountService;
use api::AppState;
use client::{AccountClient, AccountFeed, ProfileForm, SignupForm};
use image_store::ImageStore;
use model::arg::{Args, Command};
use model::config::Config;
use notify::ChangeNotifier;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("错误: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config_path = args
                .config
                .unwrap_or_else(|| Config::default_config_path().to_string());
            let config = Config::load(&config_path)
                .with_context(|| format!("加载配置失败: {}", config_path))?;

            // 初始化日志（guard 持有到进程退出）
            let _guard = logging::init(config.log_dir.as_deref());
            serve(config).await
        }
        Command::Watch { server } => {
            logging::init(None);
            watch(server).await
        }
        Command::Signup {
            server,
            email,
            password,
            confirm_password,
            image,
        } => {
            logging::init(None);
            let form = SignupForm {
                email,
                password,
                confirm_password,
            };
            let account = AccountClient::new(server)?
                .signup(&form, image.as_deref())
                .await?;
            println!("注册成功: {} ({})", account.email, account.image_url);
            Ok(())
        }
        Command::Login {
            server,
            email,
            password,
        } => {
            logging::init(None);
            let account = AccountClient::new(server)?.login(&email, &password).await?;
            println!("登录成功: {}", account.email);
            Ok(())
        }
        Command::Update {
            server,
            email,
            new_email,
            new_password,
            confirm_password,
            image,
        } => {
            logging::init(None);
            let form = ProfileForm {
                new_email,
                new_password,
                confirm_password,
            };
            update(server, email, form, image).await
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let images = ImageStore::open(&config.upload_dir, config.effective_public_base_url())
        .await
        .with_context(|| format!("创建上传目录失败: {}", config.upload_dir))?;

    let service = Arc::new(AccountService::new(ChangeNotifier::new(
        config.broadcast_capacity,
    )));

    let (io_layer, io) = SocketIo::new_layer();
    notify::socketio::register(&io, service.clone());

    let state = AppState::new(service, images).with_max_upload_bytes(config.max_upload_bytes);
    let app = api::create_router(state)
        .layer(io_layer)
        .layer(CorsLayer::permissive());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("监听地址失败: {}", addr))?;

    tracing::info!("服务已启动: http://{}", addr);
    tracing::info!("图片公开地址: {}", config.effective_public_base_url());
    if let Some(path) = config.config_path() {
        tracing::info!("配置文件: {}", path.display());
    }

    axum::serve(listener, app).await.context("HTTP 服务异常退出")?;
    Ok(())
}

async fn watch(server: String) -> anyhow::Result<()> {
    let feed = AccountFeed::new(server);
    feed.connect(|accounts| {
        tracing::info!("账号列表更新: {} 个账号", accounts.len());
        for account in &accounts {
            tracing::info!("  {} ({})", account.email, account.image_url);
        }
    })
    .await?;

    tokio::signal::ctrl_c().await.context("等待 Ctrl-C 失败")?;
    feed.disconnect().await
}

async fn update(
    server: String,
    email: String,
    form: ProfileForm,
    image: Option<PathBuf>,
) -> anyhow::Result<()> {
    AccountClient::new(server)?
        .update_profile(&email, &form, image.as_deref())
        .await?;
    println!("资料已更新: {}", email);
    Ok(())
}
