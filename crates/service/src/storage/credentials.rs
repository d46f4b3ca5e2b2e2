use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::session::store::CredentialStore;
use crate::storage::json_kv::JsonKvStore;

/// File-backed credential slot.
/// Keeps a `key -> value` map persisted as JSON under the app data directory.
#[derive(Clone)]
pub struct FileCredentialStore {
    store: Arc<JsonKvStore>,
}

impl FileCredentialStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonKvStore::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        Ok(self.store.get(key).await)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ServiceError> {
        self.store.insert(key.to_string(), value).await
    }

    async fn remove(&self, key: &str) -> Result<bool, ServiceError> {
        self.store.remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn credential_store_survives_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("svc_credentials_{}.json", Uuid::new_v4()));
        let store = FileCredentialStore::new(&tmp).await?;

        // initially empty
        assert!(store.get("token").await?.is_none());

        // set and read back
        store.set("token", "h.p.s".to_string()).await?;
        assert_eq!(store.get("token").await?.unwrap(), "h.p.s");

        // reload store from disk to ensure persistence
        let store2 = FileCredentialStore::new(&tmp).await?;
        assert_eq!(store2.get("token").await?.unwrap(), "h.p.s");

        // remove reports prior existence
        assert!(store2.remove("token").await?);
        assert!(!store2.remove("token").await?);
        assert!(store2.get("token").await?.is_none());

        // cleanup
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
