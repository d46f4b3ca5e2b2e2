use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use client::commands::Command;
use client::ops::{self, App};
use client::repl::handle_command;
use client::state::{ActiveTab, MessageKind, Region, UiState};
use service::session::domain::SessionView;
use service::session::errors::GENERIC_ERROR_TEXT;

/// In-process stand-in for the remote authentication API.
#[derive(Clone, Default)]
struct StubState {
    // email -> (name, password)
    users: Arc<Mutex<HashMap<String, (String, String)>>>,
}

fn stub_token(name: &str) -> String {
    use base64::Engine;
    let payload = json!({ "sub": "1", "name": name, "email": null, "exp": 4102444800i64 });
    let seg = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("hdr.{seg}.sig")
}

async fn stub_register(
    State(st): State<StubState>,
    Json(req): Json<models::register::Req>,
) -> (StatusCode, Json<Value>) {
    let mut users = st.users.lock().unwrap();
    if users.contains_key(&req.email) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Email already exists" })));
    }
    users.insert(req.email, (req.name, req.password));
    (StatusCode::CREATED, Json(json!({ "message": "User registered successfully" })))
}

async fn stub_login(
    State(st): State<StubState>,
    Json(req): Json<models::login::Req>,
) -> (StatusCode, Json<Value>) {
    let token = {
        let users = st.users.lock().unwrap();
        match users.get(&req.email) {
            Some((name, password)) if *password == req.password => Some(stub_token(name)),
            _ => None,
        }
    };
    match token {
        Some(token) => {
            (StatusCode::OK, Json(json!({ "message": "Login successful", "token": token })))
        }
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid credentials" }))),
    }
}

async fn stub_protected(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let Some(token) = bearer else {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Token is missing" })));
    };
    match models::token::decode_payload(token) {
        Ok(payload) => (
            StatusCode::OK,
            Json(json!({ "message": "Protected route accessed", "user": payload.name })),
        ),
        Err(_) => (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Token is invalid" }))),
    }
}

struct TestApi {
    base_url: String,
}

async fn start_api() -> anyhow::Result<TestApi> {
    let app: Router = Router::new()
        .route(models::register::PATH, post(stub_register))
        .route(models::login::PATH, post(stub_login))
        .route(models::protected::PATH, get(stub_protected))
        .with_state(StubState::default());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("stub api error: {}", e);
        }
    });

    Ok(TestApi { base_url })
}

/// Port that refuses connections: bound once, then released.
async fn dead_port_base_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

fn temp_credentials_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("client_ui_flow_{}.json", Uuid::new_v4()))
}

async fn test_app(base_url: &str, credentials_file: &std::path::Path) -> anyhow::Result<App> {
    let mut cfg = configs::AppConfig::default();
    cfg.api.base_url = base_url.to_string();
    cfg.storage.credentials_file = credentials_file.to_string_lossy().into_owned();
    cfg.normalize_and_validate()?;
    ops::build_app(&cfg).await
}

#[tokio::test]
async fn signup_success_switches_back_to_login_tab_after_delay() -> anyhow::Result<()> {
    let api = start_api().await?;
    let app = test_app(&api.base_url, &temp_credentials_path()).await?;
    let mut ui = UiState::default();
    ui.active_tab = ActiveTab::Signup;

    let started = Instant::now();
    handle_command(
        &app,
        &mut ui,
        Command::Signup {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            password: Some("pw".into()),
        },
        Duration::from_millis(20),
    )
    .await?;

    assert!(started.elapsed() >= Duration::from_millis(20));
    assert_eq!(ui.active_tab, ActiveTab::Login);
    let message = ui.signup_message.clone().expect("signup message");
    assert_eq!(message.kind, MessageKind::Success);
    assert_eq!(message.text, "User registered successfully");
    assert!(ui.signup_form.name.is_empty());
    assert_eq!(ui.visible_region(), Region::TabContainer);
    Ok(())
}

#[tokio::test]
async fn rejected_signup_keeps_the_form_and_the_tab() -> anyhow::Result<()> {
    let api = start_api().await?;
    let app = test_app(&api.base_url, &temp_credentials_path()).await?;
    ops::register(&app, "Ada".into(), "ada@example.com".into(), "pw".into()).await?;

    let mut ui = UiState::default();
    handle_command(
        &app,
        &mut ui,
        Command::Signup {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            password: Some("pw".into()),
        },
        Duration::from_millis(20),
    )
    .await?;

    assert_eq!(ui.active_tab, ActiveTab::Signup);
    let message = ui.signup_message.clone().expect("signup message");
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, "Email already exists");
    assert_eq!(ui.signup_form.email, "ada@example.com");
    Ok(())
}

#[tokio::test]
async fn failed_login_keeps_the_form_and_shows_the_server_text() -> anyhow::Result<()> {
    let api = start_api().await?;
    let app = test_app(&api.base_url, &temp_credentials_path()).await?;
    let mut ui = UiState::default();

    handle_command(
        &app,
        &mut ui,
        Command::Login { email: Some("ghost@example.com".into()), password: Some("nope".into()) },
        Duration::ZERO,
    )
    .await?;

    let message = ui.login_message.clone().expect("login message");
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, "Invalid credentials");
    assert_eq!(ui.login_form.email, "ghost@example.com");
    assert_eq!(ui.visible_region(), Region::TabContainer);
    Ok(())
}

#[tokio::test]
async fn successful_login_shows_welcome_and_logout_returns_to_tabs() -> anyhow::Result<()> {
    let api = start_api().await?;
    let app = test_app(&api.base_url, &temp_credentials_path()).await?;
    ops::register(&app, "Ada".into(), "ada@example.com".into(), "pw".into()).await?;

    let mut ui = UiState::default();
    handle_command(
        &app,
        &mut ui,
        Command::Login { email: Some("ada@example.com".into()), password: Some("pw".into()) },
        Duration::ZERO,
    )
    .await?;

    assert_eq!(ui.visible_region(), Region::Welcome);
    assert!(ui.render().contains("Welcome, Ada!"));
    assert!(ui.login_form.email.is_empty());
    let message = ui.login_message.clone().expect("login message");
    assert_eq!(message.kind, MessageKind::Success);
    assert_eq!(message.text, "Login successful");

    // a second submit while signed in is refused and changes nothing
    handle_command(
        &app,
        &mut ui,
        Command::Login { email: Some("other@example.com".into()), password: Some("x".into()) },
        Duration::ZERO,
    )
    .await?;
    assert_eq!(ui.visible_region(), Region::Welcome);
    assert_eq!(ui.login_message.clone().expect("login message").text, "Login successful");

    handle_command(&app, &mut ui, Command::Logout, Duration::ZERO).await?;
    assert_eq!(ui.visible_region(), Region::TabContainer);
    // logout does not clear the message areas
    assert_eq!(ui.login_message.clone().expect("login message").text, "Login successful");
    Ok(())
}

#[tokio::test]
async fn transport_failure_shows_the_generic_text() -> anyhow::Result<()> {
    let base_url = dead_port_base_url().await?;
    let app = test_app(&base_url, &temp_credentials_path()).await?;
    let mut ui = UiState::default();

    handle_command(
        &app,
        &mut ui,
        Command::Login { email: Some("ada@example.com".into()), password: Some("pw".into()) },
        Duration::ZERO,
    )
    .await?;

    let message = ui.login_message.clone().expect("login message");
    assert_eq!(message.kind, MessageKind::Error);
    assert_eq!(message.text, GENERIC_ERROR_TEXT);
    assert_eq!(ui.visible_region(), Region::TabContainer);
    Ok(())
}

#[tokio::test]
async fn one_shot_ops_share_the_stored_token() -> anyhow::Result<()> {
    let api = start_api().await?;
    let credentials_file = temp_credentials_path();

    let app = test_app(&api.base_url, &credentials_file).await?;
    assert_eq!(ops::status(&app).await?, SessionView::Anonymous);
    ops::register(&app, "Ada".into(), "ada@example.com".into(), "pw".into()).await?;
    let said = ops::login(&app, "ada@example.com".into(), "pw".into()).await?;
    assert!(said.starts_with("Login successful"));

    // a fresh build over the same file restores the session
    let later = test_app(&api.base_url, &credentials_file).await?;
    assert_eq!(ops::status(&later).await?, SessionView::Authenticated { name: "Ada".into() });
    let who = ops::whoami(&later).await?;
    assert_eq!(who.user, "Ada");

    ops::logout(&later).await?;
    assert_eq!(ops::status(&later).await?, SessionView::Anonymous);
    Ok(())
}
