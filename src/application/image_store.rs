// Store trait for probing radar images on disk
use async_trait::async_trait;
use std::path::Path;
use std::time::SystemTime;

/// Access to the directory an external process drops rendered radar images
/// into. The gallery only ever asks one question of it: does this file exist
/// right now, and when was it last written.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Modification time of the file at `path` when it exists, `None` when it
    /// does not (unreadable files count as absent).
    async fn probe(&self, path: &Path) -> Option<SystemTime>;
}
