//! Session module: projector over an injected credential slot.
//!
//! This module centralizes login, registration, logout, and session restore
//! under the service crate, away from any concrete UI.

pub mod domain;
pub mod errors;
pub mod projector;
pub mod store;

pub use projector::SessionProjector;
