//! Local filesystem storage implementation.
//!
//! Writes artifacts below a root directory. Used for development runs and
//! whenever the CLI is pointed at a directory instead of a bucket.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::storage::ArtifactStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }
}

#[async_trait]
impl ArtifactStorage for LocalStorage {
    async fn put_json(&self, key: &str, body: Vec<u8>) -> Result<String> {
        let path = self.write_bytes(key, &body).await?;
        log::debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_write_replaces_temp_file() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let location = storage
            .put_json("weather.json", br#"{"days":[]}"#.to_vec())
            .await
            .unwrap();
        assert!(location.ends_with("weather.json"));

        let data = std::fs::read(tmp.path().join("weather.json")).unwrap();
        assert_eq!(data, br#"{"days":[]}"#);
        assert!(!tmp.path().join("weather.tmp").exists());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.put_json("weather.json", b"{}".to_vec()).await.unwrap();
        storage.put_json("weather.json", b"[]".to_vec()).await.unwrap();

        let data = std::fs::read(tmp.path().join("weather.json")).unwrap();
        assert_eq!(data, b"[]");
    }

    #[tokio::test]
    async fn test_creates_missing_root() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested/out"));

        storage.put_json("weather_points.json", b"{}".to_vec()).await.unwrap();
        assert!(storage.root().join("weather_points.json").exists());
    }
}
