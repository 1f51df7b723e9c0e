//! Blob storage.

pub mod filesystem;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncRead;

use crate::error::Result;

pub use filesystem::FilesystemStorage;

/// Storage backend trait
///
/// Keys are server-generated (`<record-id>/<filename>`), never raw client
/// input, so two concurrent uploads can never contend for the same path.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store content under the given key
    async fn put(&self, key: &str, content: Bytes) -> Result<()>;

    /// Retrieve full content by key
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Open content for chunked reading
    async fn open(&self, key: &str) -> Result<Box<dyn AsyncRead + Send + Unpin>>;

    /// Check if key exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Get content size without fetching content
    async fn size(&self, key: &str) -> Result<u64>;

    /// Delete content by key
    async fn delete(&self, key: &str) -> Result<()>;
}
