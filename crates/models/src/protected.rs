use serde::{Deserialize, Serialize};

/// Result of fetching the bearer-gated resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resp {
    pub message: String,
    pub user: String,
}

/// Where the protected endpoint lives. GET with `Authorization: Bearer`.
pub const PATH: &str = "/api/protected";
