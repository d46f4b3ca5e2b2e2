//! App assembly and the one-shot operations behind the CLI subcommands.

use std::path::Path;

use tracing::error;

use configs::AppConfig;
use service::api::AuthApi;
use service::runtime;
use service::session::domain::{LoginInput, RegisterInput, SessionView};
use service::session::errors::SessionError;
use service::session::SessionProjector;
use service::storage::credentials::FileCredentialStore;

pub struct App {
    pub projector: SessionProjector<FileCredentialStore>,
}

/// Build the projector stack from a validated config.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<App> {
    let data_dir = Path::new(&cfg.storage.credentials_file)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    runtime::ensure_env(&data_dir).await?;

    let store = FileCredentialStore::new(&cfg.storage.credentials_file).await?;
    let api = AuthApi::new(&cfg.api.base_url);
    Ok(App { projector: SessionProjector::new(store, api) })
}

/// Log a session failure and turn it into the text a user should see.
fn surface(e: SessionError, op: &'static str) -> anyhow::Error {
    let msg = e.user_message().to_string();
    error!(op, code = e.code(), error = %e, "operation failed");
    anyhow::anyhow!(msg)
}

pub async fn login(app: &App, email: String, password: String) -> anyhow::Result<String> {
    let receipt = app
        .projector
        .login(LoginInput { email, password })
        .await
        .map_err(|e| surface(e, "login"))?;
    let name = match &receipt.view {
        SessionView::Authenticated { name } => name.as_str(),
        SessionView::Anonymous => "",
    };
    Ok(format!("{}\nsigned in as {}", receipt.message, name))
}

pub async fn register(
    app: &App,
    name: String,
    email: String,
    password: String,
) -> anyhow::Result<String> {
    app.projector
        .register(RegisterInput { name, email, password })
        .await
        .map_err(|e| surface(e, "register"))
}

pub async fn logout(app: &App) -> anyhow::Result<String> {
    app.projector.logout().await.map_err(|e| surface(e, "logout"))?;
    Ok("logged out".to_string())
}

/// Restore and report the session projection, exactly as a fresh start does.
pub async fn status(app: &App) -> anyhow::Result<SessionView> {
    app.projector.initialize().await.map_err(|e| surface(e, "status"))
}

pub async fn whoami(app: &App) -> anyhow::Result<models::protected::Resp> {
    app.projector.fetch_protected().await.map_err(|e| surface(e, "whoami"))
}
