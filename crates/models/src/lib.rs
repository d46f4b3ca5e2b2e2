use serde::{Deserialize, Serialize};

pub mod errors;
pub mod token;
pub mod login;
pub mod register;
pub mod protected;

/// Error body every endpoint returns on a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
