use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Two-valued session projection derived from the persisted slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionView {
    Anonymous,
    Authenticated { name: String },
}

impl SessionView {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionView::Authenticated { .. })
    }
}

/// Login result (confirmation message plus the refreshed projection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReceipt {
    pub message: String,
    pub view: SessionView,
}
