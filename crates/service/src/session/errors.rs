use thiserror::Error;

/// Fixed text shown when a failure carries no server-provided message.
pub const GENERIC_ERROR_TEXT: &str = "An error occurred. Please try again.";

/// Business errors for session workflows
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl SessionError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            SessionError::Rejected(_) => 1001,
            SessionError::Transport(_) => 1101,
            SessionError::MalformedToken(_) => 1102,
            SessionError::Storage(_) => 1200,
        }
    }

    /// Text for the message area. Server rejections carry their own message;
    /// every other failure shows the fixed generic text.
    pub fn user_message(&self) -> &str {
        match self {
            SessionError::Rejected(msg) => msg,
            _ => GENERIC_ERROR_TEXT,
        }
    }
}
