// Filesystem-backed image store
use crate::application::image_store::ImageStore;
use async_trait::async_trait;
use std::path::Path;
use std::time::SystemTime;

/// Probes the local filesystem directly. The image directory is read-mostly:
/// an external process drops rendered radar frames in, this service only
/// looks at them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageStore;

#[async_trait]
impl ImageStore for FsImageStore {
    async fn probe(&self, path: &Path) -> Option<SystemTime> {
        let meta = tokio::fs::metadata(path).await.ok()?;
        if !meta.is_file() {
            return None;
        }
        meta.modified().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_existing_file_returns_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kbis_br1_0.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let modified = FsImageStore.probe(&path).await;
        assert!(modified.is_some());
        assert!(modified.unwrap() <= SystemTime::now());
    }

    #[tokio::test]
    async fn test_probe_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kbis_br1_0.png");

        assert!(FsImageStore.probe(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_probe_directory_returns_none() {
        let dir = tempfile::tempdir().unwrap();

        assert!(FsImageStore.probe(dir.path()).await.is_none());
    }
}
