//! File storage for inspection attachments.
//!
//! Uploaded images and documents are persisted through the [`FileStore`]
//! trait so handlers and tests stay independent of the backing medium.
//! The production implementation writes to a local directory; deletion is
//! best-effort because the database row is the source of truth and an
//! orphaned file only wastes disk.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

/// Every category files are stored under. Cascade deletes sweep all of
/// them, since stored names are unique across categories.
pub const FILE_CATEGORIES: &[&str] = &["diagrams", "images", "documents"];

/// Persists uploaded files under a per-category namespace.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `data` under `category`, deriving the extension from
    /// `original_name`. Returns the stored file name.
    async fn save(
        &self,
        category: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, std::io::Error>;

    /// Remove a stored file. Failures are logged, never surfaced.
    async fn delete(&self, category: &str, file_name: &str);
}

/// [`FileStore`] backed by a local directory tree: `<root>/<category>/<name>`.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, category: &str, file_name: &str) -> PathBuf {
        self.root.join(category).join(file_name)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(
        &self,
        category: &str,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, std::io::Error> {
        let dir = self.root.join(category);
        tokio::fs::create_dir_all(&dir).await?;

        // Random names avoid collisions and path traversal via the
        // client-supplied file name; only the extension is kept.
        let ext = std::path::Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());
        let stored = format!("{}.{ext}", Uuid::new_v4());

        tokio::fs::write(dir.join(&stored), data).await?;
        Ok(stored)
    }

    async fn delete(&self, category: &str, file_name: &str) {
        let path = self.path_for(category, file_name);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove stored file");
            }
        }
    }
}
