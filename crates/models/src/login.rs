use serde::{Deserialize, Serialize};

/// The request to log into the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    /// Email the account was registered with.
    pub email: String,

    /// Plaintext password to check against the account.
    pub password: String,
}

/// Result of logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resp {
    /// Human-readable confirmation for the message area.
    pub message: String,

    /// Issued token to persist for later sessions.
    pub token: String,
}

/// Where the login endpoint lives.
pub const PATH: &str = "/api/login";
