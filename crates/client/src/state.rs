//! Screen state for the interactive shell.
//!
//! An auth container with two tabbed forms, or a welcome section once a
//! session exists. Which one is on screen is derived from the session view,
//! never stored separately.

use service::session::domain::SessionView;

/// Tabs of the auth container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Login,
    Signup,
}

impl ActiveTab {
    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Login => "login",
            ActiveTab::Signup => "signup",
        }
    }
}

/// Kind of text sitting in a form's message area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// One form's message area.
#[derive(Debug, Clone)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: MessageKind::Error, text: text.into() }
    }
}

/// Login form fields. Retained on failure, cleared on success.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form fields. Retained on failure, cleared on success.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The single visible region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    TabContainer,
    Welcome,
}

pub struct UiState {
    pub active_tab: ActiveTab,
    pub login_form: LoginForm,
    pub signup_form: SignupForm,
    pub login_message: Option<Message>,
    pub signup_message: Option<Message>,
    pub view: SessionView,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_tab: ActiveTab::Login,
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
            login_message: None,
            signup_message: None,
            view: SessionView::Anonymous,
        }
    }
}

impl UiState {
    /// Exactly one region is visible at any time, decided by the session view.
    pub fn visible_region(&self) -> Region {
        if self.view.is_authenticated() {
            Region::Welcome
        } else {
            Region::TabContainer
        }
    }

    pub fn set_view(&mut self, view: SessionView) {
        self.view = view;
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        match self.visible_region() {
            Region::Welcome => {
                let name = match &self.view {
                    SessionView::Authenticated { name } => name.as_str(),
                    SessionView::Anonymous => "",
                };
                out.push_str(&format!("Welcome, {name}!\n"));
                out.push_str("(logout to sign out, whoami to ask the API)\n");
            }
            Region::TabContainer => {
                out.push_str(&format!(
                    "{} | {}\n",
                    tab_label(ActiveTab::Login, self.active_tab),
                    tab_label(ActiveTab::Signup, self.active_tab)
                ));
                match self.active_tab {
                    ActiveTab::Login => {
                        out.push_str(&format!("  email:    {}\n", self.login_form.email));
                        out.push_str(&format!("  password: {}\n", mask(&self.login_form.password)));
                        push_message(&mut out, &self.login_message);
                    }
                    ActiveTab::Signup => {
                        out.push_str(&format!("  name:     {}\n", self.signup_form.name));
                        out.push_str(&format!("  email:    {}\n", self.signup_form.email));
                        out.push_str(&format!("  password: {}\n", mask(&self.signup_form.password)));
                        push_message(&mut out, &self.signup_message);
                    }
                }
            }
        }
        out
    }
}

fn tab_label(tab: ActiveTab, active: ActiveTab) -> String {
    if tab == active {
        format!("[{}]", tab.label())
    } else {
        tab.label().to_string()
    }
}

fn mask(password: &str) -> String {
    "*".repeat(password.chars().count())
}

fn push_message(out: &mut String, message: &Option<Message>) {
    if let Some(m) = message {
        let tag = match m.kind {
            MessageKind::Success => "ok",
            MessageKind::Error => "error",
        };
        out.push_str(&format!("  [{}] {}\n", tag, m.text));
    }
}
