use serde::{Deserialize, Serialize};

/// The request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Req {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Result of registering. No token is issued; the user logs in afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resp {
    pub message: String,
}

/// Where the register endpoint lives.
pub const PATH: &str = "/api/register";
