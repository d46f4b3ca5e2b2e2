//! Command grammar of the interactive shell.

use crate::state::ActiveTab;

/// Commands accepted by the shell, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(ActiveTab),
    Login { email: Option<String>, password: Option<String> },
    Signup { name: Option<String>, email: Option<String>, password: Option<String> },
    Logout,
    Whoami,
    Show,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
commands:
  tab login|signup                 switch the active tab
  login [email] [password]         submit the login form (missing fields are kept from the form)
  signup [name] [email] [password] submit the signup form
  logout                           clear the stored token
  whoami                           fetch the protected resource with the stored token
  show                             redraw the screen
  help                             this text
  quit                             leave the shell";

/// Parse one input line. Empty lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(None);
    };
    let cmd = match head {
        "tab" => match tokens.get(1).copied() {
            Some("login") => Command::Tab(ActiveTab::Login),
            Some("signup") => Command::Tab(ActiveTab::Signup),
            _ => return Err("usage: tab login|signup".to_string()),
        },
        "login" => {
            if tokens.len() > 3 {
                return Err("usage: login [email] [password]".to_string());
            }
            Command::Login {
                email: tokens.get(1).map(|s| s.to_string()),
                password: tokens.get(2).map(|s| s.to_string()),
            }
        }
        "signup" => {
            if tokens.len() > 4 {
                return Err("usage: signup [name] [email] [password]".to_string());
            }
            Command::Signup {
                name: tokens.get(1).map(|s| s.to_string()),
                email: tokens.get(2).map(|s| s.to_string()),
                password: tokens.get(3).map(|s| s.to_string()),
            }
        }
        "logout" => Command::Logout,
        "whoami" => Command::Whoami,
        "show" => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tab_switches() {
        assert_eq!(parse("tab login").unwrap(), Some(Command::Tab(ActiveTab::Login)));
        assert_eq!(parse("tab signup").unwrap(), Some(Command::Tab(ActiveTab::Signup)));
        assert!(parse("tab sideways").is_err());
        assert!(parse("tab").is_err());
    }

    #[test]
    fn parses_login_with_partial_arguments() {
        assert_eq!(
            parse("login ada@example.com secret").unwrap(),
            Some(Command::Login {
                email: Some("ada@example.com".into()),
                password: Some("secret".into())
            })
        );
        assert_eq!(
            parse("login ada@example.com").unwrap(),
            Some(Command::Login { email: Some("ada@example.com".into()), password: None })
        );
        assert_eq!(parse("login").unwrap(), Some(Command::Login { email: None, password: None }));
        assert!(parse("login a b c").is_err());
    }

    #[test]
    fn parses_signup_arguments_in_order() {
        assert_eq!(
            parse("signup Ada ada@example.com secret").unwrap(),
            Some(Command::Signup {
                name: Some("Ada".into()),
                email: Some("ada@example.com".into()),
                password: Some("secret".into())
            })
        );
    }

    #[test]
    fn empty_line_is_no_command() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn unknown_word_reports_error() {
        assert!(parse("frobnicate").is_err());
    }
}
