use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("token shape error: {0}")]
    Shape(String),
    #[error("token decode error: {0}")]
    Decode(String),
}
