//! PhotoStore: the operations the gallery needs from a cloud bucket. Handlers
//! only see this trait, so the concrete client can be swapped (GCS in
//! production, an in-memory fake in tests).

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("`{0}` not found in object store")]
    NotFound(String),
    #[error("access to `{0}` denied by object store")]
    PermissionDenied(String),
    #[error("invalid object name `{0}`")]
    InvalidObjectName(String),
    #[error("object store request failed: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle passed to handlers as router state.
pub type SharedStore = Arc<dyn PhotoStore>;

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Name of the bucket every operation targets.
    fn bucket(&self) -> &str;

    /// Names of all objects in the bucket, in the order the store returns them.
    async fn list_objects(&self) -> StoreResult<Vec<String>>;

    /// Write `bytes` as object `name` with `content_type` metadata, replacing
    /// any existing object of that name.
    ///
    /// Returns the object name as the store recorded it, which is the name
    /// to use for [`PhotoStore::make_public`] and for public URLs.
    async fn write_object(&self, name: &str, bytes: Bytes, content_type: &str)
    -> StoreResult<String>;

    /// Grant anonymous read access to an existing object.
    async fn make_public(&self, name: &str) -> StoreResult<()>;
}

impl From<object_store::Error> for StoreError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => StoreError::NotFound(path),
            object_store::Error::PermissionDenied { path, .. }
            | object_store::Error::Unauthenticated { path, .. } => {
                StoreError::PermissionDenied(path)
            }
            object_store::Error::InvalidPath { source } => {
                StoreError::InvalidObjectName(source.to_string())
            }
            other => StoreError::Backend(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}
