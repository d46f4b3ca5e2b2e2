use async_trait::async_trait;

use crate::errors::ServiceError;

/// Slot key under which the issued token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Storage abstraction for the credential slot.
/// Implementations can be file-backed, in-memory, or a platform keyring.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError>;
    async fn set(&self, key: &str, value: String) -> Result<(), ServiceError>;
    async fn remove(&self, key: &str) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryCredentialStore {
        slots: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl CredentialStore for MemoryCredentialStore {
        async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
            let slots = self.slots.lock().unwrap();
            Ok(slots.get(key).cloned())
        }

        async fn set(&self, key: &str, value: String) -> Result<(), ServiceError> {
            let mut slots = self.slots.lock().unwrap();
            slots.insert(key.to_string(), value);
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<bool, ServiceError> {
            let mut slots = self.slots.lock().unwrap();
            Ok(slots.remove(key).is_some())
        }
    }
}
