//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{Operator, services};

use super::StorageProvider;
use super::error::StorageError;

/// Write handle for the image bucket.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct StorageService {
    operator: Operator,
    provider: StorageProvider,
}

impl StorageService {
    /// Create a new storage service for a provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_provider(provider: StorageProvider) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&provider)?;
        Ok(Self { operator, provider })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                bucket,
                region,
                endpoint,
                access_key_id,
                secret_access_key,
            } => {
                let mut builder = services::S3::default().bucket(bucket);
                if let Some(region) = region {
                    builder = builder.region(region);
                }
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }
                if let Some(access_key_id) = access_key_id {
                    builder = builder.access_key_id(access_key_id);
                }
                if let Some(secret_access_key) = secret_access_key {
                    builder = builder.secret_access_key(secret_access_key);
                }

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish(),
        };

        Ok(operator)
    }

    /// Store `data` under `key`.
    ///
    /// No ACL is attached; the object keeps the bucket's default (private)
    /// access.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn put(&self, key: &str, data: Bytes) -> Result<(), StorageError> {
        self.operator
            .write(key, data)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Check if an object exists in storage.
    #[cfg(any(test, feature = "test-support"))]
    pub async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.provider.bucket()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_storage() -> StorageService {
        StorageService::from_provider(StorageProvider::Memory).expect("memory storage")
    }

    #[tokio::test]
    async fn test_put_then_exists() {
        let storage = memory_storage();
        let key = "0b8f6e3a-6d1c-4a52-9a57-3f2f8f4f7c11.png";

        assert!(!storage.exists(key).await);
        storage
            .put(key, Bytes::from_static(b"\x89PNG"))
            .await
            .expect("write should succeed");
        assert!(storage.exists(key).await);
    }

    #[tokio::test]
    async fn test_put_empty_payload() {
        let storage = memory_storage();
        storage
            .put("empty", Bytes::new())
            .await
            .expect("empty write should succeed");
        assert!(storage.exists("empty").await);
    }

    #[test]
    fn test_provider_metadata() {
        let storage = memory_storage();
        assert_eq!(storage.provider_name(), "memory");
        assert_eq!(storage.bucket(), "memory");
    }

    #[test]
    fn test_local_fs_provider() {
        let root = std::env::temp_dir().join("msgcreator-storage-test");
        let storage =
            StorageService::from_provider(StorageProvider::local_fs(root)).expect("fs storage");
        assert_eq!(storage.provider_name(), "local");
    }
}
