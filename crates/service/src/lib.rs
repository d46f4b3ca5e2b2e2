//! Service layer providing the session core on top of models.
//! - Separates session logic from any UI surface.
//! - Reuses wire records and token decoding from the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod api;
pub mod errors;
pub mod runtime;
pub mod session;
pub mod storage;
