//! Interactive shell: reads line commands and drives the tabbed screen.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::commands::{self, Command, HELP_TEXT};
use crate::ops::App;
use crate::state::{ActiveTab, Message, Region, UiState};
use service::session::domain::{LoginInput, RegisterInput};

/// Pause between a successful signup and the switch back to the login tab.
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Outcome of one handled command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the shell until `quit` or EOF.
pub async fn run_shell(app: &App, redirect_delay: Duration) -> anyhow::Result<()> {
    let mut ui = UiState::default();
    ui.set_view(app.projector.initialize().await?);
    println!("{}", ui.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match commands::parse(&line) {
            Err(usage) => println!("{usage}"),
            Ok(None) => {}
            Ok(Some(cmd)) => {
                if handle_command(app, &mut ui, cmd, redirect_delay).await? == Flow::Quit {
                    break;
                }
                println!("{}", ui.render());
            }
        }
    }
    Ok(())
}

/// Apply one parsed command to the screen state.
pub async fn handle_command(
    app: &App,
    ui: &mut UiState,
    cmd: Command,
    redirect_delay: Duration,
) -> anyhow::Result<Flow> {
    match cmd {
        Command::Quit => return Ok(Flow::Quit),
        Command::Help => println!("{HELP_TEXT}"),
        Command::Show => {}
        Command::Tab(tab) => ui.active_tab = tab,
        Command::Logout => {
            let view = app.projector.logout().await?;
            ui.set_view(view);
        }
        Command::Whoami => match app.projector.fetch_protected().await {
            Ok(resp) => println!("{} ({})", resp.message, resp.user),
            Err(e) => {
                error!(code = e.code(), error = %e, "whoami failed");
                println!("{}", e.user_message());
            }
        },
        Command::Login { email, password } => submit_login(app, ui, email, password).await?,
        Command::Signup { name, email, password } => {
            submit_signup(app, ui, name, email, password, redirect_delay).await?
        }
    }
    Ok(Flow::Continue)
}

async fn submit_login(
    app: &App,
    ui: &mut UiState,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    if ui.visible_region() == Region::Welcome {
        println!("already signed in; logout first");
        return Ok(());
    }
    ui.active_tab = ActiveTab::Login;
    if let Some(email) = email {
        ui.login_form.email = email;
    }
    if let Some(password) = password {
        ui.login_form.password = password;
    }

    if ui.login_form.email.trim().is_empty() {
        ui.login_message = Some(Message::error("email is required"));
        return Ok(());
    }
    if ui.login_form.password.is_empty() {
        ui.login_form.password = prompt_password("password: ").await?;
    }

    let input = LoginInput {
        email: ui.login_form.email.clone(),
        password: ui.login_form.password.clone(),
    };
    match app.projector.login(input).await {
        Ok(receipt) => {
            ui.login_message = Some(Message::success(receipt.message));
            ui.login_form = Default::default();
            ui.set_view(receipt.view);
        }
        Err(e) => {
            error!(code = e.code(), error = %e, "login failed");
            ui.login_message = Some(Message::error(e.user_message()));
            ui.set_view(app.projector.current_view().await?);
        }
    }
    Ok(())
}

async fn submit_signup(
    app: &App,
    ui: &mut UiState,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    redirect_delay: Duration,
) -> anyhow::Result<()> {
    if ui.visible_region() == Region::Welcome {
        println!("already signed in; logout first");
        return Ok(());
    }
    ui.active_tab = ActiveTab::Signup;
    if let Some(name) = name {
        ui.signup_form.name = name;
    }
    if let Some(email) = email {
        ui.signup_form.email = email;
    }
    if let Some(password) = password {
        ui.signup_form.password = password;
    }

    if ui.signup_form.name.trim().is_empty() {
        ui.signup_message = Some(Message::error("name is required"));
        return Ok(());
    }
    if ui.signup_form.email.trim().is_empty() {
        ui.signup_message = Some(Message::error("email is required"));
        return Ok(());
    }
    if ui.signup_form.password.is_empty() {
        ui.signup_form.password = prompt_password("password: ").await?;
    }

    let input = RegisterInput {
        name: ui.signup_form.name.clone(),
        email: ui.signup_form.email.clone(),
        password: ui.signup_form.password.clone(),
    };
    match app.projector.register(input).await {
        Ok(message) => {
            ui.signup_message = Some(Message::success(message));
            ui.signup_form = Default::default();
            // fixed pause before the switch back to the login tab
            tokio::time::sleep(redirect_delay).await;
            ui.active_tab = ActiveTab::Login;
        }
        Err(e) => {
            error!(code = e.code(), error = %e, "signup failed");
            ui.signup_message = Some(Message::error(e.user_message()));
        }
    }
    Ok(())
}

async fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    let prompt = prompt.to_string();
    let password = tokio::task::spawn_blocking(move || rpassword::prompt_password(prompt)).await??;
    Ok(password)
}
