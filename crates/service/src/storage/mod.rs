//! Storage for the service layer
//!
//! Contains the file-backed JSON store and the credential slot built on it.

pub mod credentials;
pub mod json_kv;
