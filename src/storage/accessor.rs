// src/storage/accessor.rs
use std::sync::Arc;

use bevy::prelude::Resource;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use thiserror::Error;
use tokio::runtime::Runtime;

use super::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object store error: {0}")]
    Backend(#[from] object_store::Error),
    #[error("failed to start storage runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Blocking wrapper around a single object-store backend.
///
/// Constructed once at startup from validated configuration and passed
/// around explicitly. Every call blocks the caller on a private
/// current-thread runtime; there is no background work and no cancellation.
#[derive(Resource)]
pub struct StorageAccessor {
    store: Arc<dyn ObjectStore>,
    runtime: Runtime,
    bucket: String,
}

impl StorageAccessor {
    /// Builds the S3 backend from credential-store configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let store = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key)
            .build()?;
        Self::with_store(Arc::new(store), config.bucket.clone())
    }

    /// Wraps an already-built store. Tests use this with an in-memory
    /// backend; the bucket name is only used for addressing and messages.
    pub fn with_store(store: Arc<dyn ObjectStore>, bucket: String) -> Result<Self, StorageError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(StorageAccessor {
            store,
            runtime,
            bucket,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn read(&self, key: &str) -> Result<Bytes, StorageError> {
        let path = ObjectPath::from(key);
        self.runtime.block_on(async {
            let result = self.store.get(&path).await.map_err(StorageError::from)?;
            result.bytes().await.map_err(StorageError::from)
        })
    }

    pub fn write(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = ObjectPath::from(key);
        self.runtime.block_on(async {
            self.store
                .put(&path, PutPayload::from(bytes))
                .await
                .map_err(StorageError::from)
                .map(|_| ())
        })
    }

    pub fn copy(&self, src_key: &str, dst_key: &str) -> Result<(), StorageError> {
        let from = ObjectPath::from(src_key);
        let to = ObjectPath::from(dst_key);
        self.runtime.block_on(async {
            self.store
                .copy(&from, &to)
                .await
                .map_err(StorageError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn memory_accessor() -> StorageAccessor {
        StorageAccessor::with_store(Arc::new(InMemory::new()), "test-bucket".to_string()).unwrap()
    }

    #[test]
    fn write_then_read_round_trips() {
        let accessor = memory_accessor();
        accessor.write("data/table.parquet", b"payload".to_vec()).unwrap();
        let bytes = accessor.read("data/table.parquet").unwrap();
        assert_eq!(bytes.as_ref(), b"payload");
    }

    #[test]
    fn read_missing_object_fails() {
        let accessor = memory_accessor();
        assert!(accessor.read("absent.parquet").is_err());
    }

    #[test]
    fn copy_duplicates_the_source_object() {
        let accessor = memory_accessor();
        accessor.write("a.parquet", b"original".to_vec()).unwrap();
        accessor.copy("a.parquet", "backups/a.parquet").unwrap();
        assert_eq!(accessor.read("backups/a.parquet").unwrap().as_ref(), b"original");
        // Source stays intact.
        assert_eq!(accessor.read("a.parquet").unwrap().as_ref(), b"original");
    }

    #[test]
    fn copy_missing_source_fails() {
        let accessor = memory_accessor();
        assert!(accessor.copy("absent.parquet", "backups/absent.parquet").is_err());
    }
}
