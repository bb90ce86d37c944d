use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// 默认服务器地址（客户端子命令）
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// 账号同步服务
#[derive(Parser, Debug)]
#[command(name = "account-sync", version, about)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 启动服务端（默认）
    Serve,

    /// 连接服务端并实时打印账号列表
    Watch {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
    },

    /// 注册新账号
    Signup {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// 头像图片文件
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// 登录（校验邮箱与密码）
    Login {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// 修改账号资料
    Update {
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
        /// 当前邮箱
        #[arg(long)]
        email: String,
        #[arg(long)]
        new_email: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
        /// 新头像图片文件
        #[arg(long)]
        image: Option<PathBuf>,
    },
}
