//! CLI entry: argument parsing, config assembly, dispatch.

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;

use crate::{ops, repl};
use common::utils::logging::{init_logging_default, init_logging_json};
use service::session::domain::SessionView;

#[derive(Parser, Debug)]
#[command(name = "login-app", version, about = "Tabbed login/signup client for a remote auth API")]
struct Cli {
    /// Base URL of the remote API
    #[arg(long, env = "API_BASE_URL")]
    base_url: Option<String>,

    /// Path of the JSON file holding the stored token
    #[arg(long, env = "CREDENTIALS_FILE")]
    credentials_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive shell with the tabbed screen
    Shell,
    /// Log in and persist the issued token
    Login {
        email: String,
        /// Prompted without echo when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        name: String,
        email: String,
        /// Prompted without echo when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the stored token
    Logout,
    /// Report the restored session projection
    Status,
    /// Fetch the protected route with the stored token
    Whoami,
}

fn init_logging() {
    // LOG_FORMAT=json 切换为结构化输出，便于采集
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}

/// Parse the command line, assemble the config, run the selected command.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let mut cfg = configs::load_default()?;
    // 命令行参数优先于配置文件
    if let Some(url) = cli.base_url {
        cfg.api.base_url = url;
    }
    if let Some(path) = cli.credentials_file {
        cfg.storage.credentials_file = path;
    }
    cfg.normalize_and_validate()?;

    let app = ops::build_app(&cfg).await?;
    info!(base_url = %cfg.api.base_url, "client ready");

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => repl::run_shell(&app, repl::SIGNUP_REDIRECT_DELAY).await,
        Command::Login { email, password } => {
            let password = obtain_password(password)?;
            println!("{}", ops::login(&app, email, password).await?);
            Ok(())
        }
        Command::Register { name, email, password } => {
            let password = obtain_password(password)?;
            println!("{}", ops::register(&app, name, email, password).await?);
            Ok(())
        }
        Command::Logout => {
            println!("{}", ops::logout(&app).await?);
            Ok(())
        }
        Command::Status => {
            match ops::status(&app).await? {
                SessionView::Authenticated { name } => println!("authenticated as {name}"),
                SessionView::Anonymous => println!("anonymous"),
            }
            Ok(())
        }
        Command::Whoami => {
            let resp = ops::whoami(&app).await?;
            println!("{} ({})", resp.message, resp.user);
            Ok(())
        }
    }
}

fn obtain_password(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(p) => Ok(p),
        None => Ok(rpassword::prompt_password("password: ")?),
    }
}
