//! JSON file implementation of the `StateStore` trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use virtueverse_core::error::DomainError;
use virtueverse_core::store::StateStore;

/// Stores the session document as a single pretty-printed JSON file.
///
/// Writes go to a uniquely named sibling temp file which is synced and then
/// renamed over the target, so readers never observe a partial document.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("state.json");
        self.path.with_file_name(format!(
            ".{name}.{}.tmp",
            uuid::Uuid::new_v4().simple()
        ))
    }
}

/// Flushes the directory entry of `path` so a completed rename survives a
/// crash. A bare file name refers to the current directory.
#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    tokio::fs::File::open(parent).await?.sync_all().await
}

#[cfg(not(unix))]
#[allow(clippy::unused_async)]
async fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn storage_error(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Storage(format!("{context}: {e}"))
}

#[async_trait]
impl StateStore for JsonFileStateStore {
    async fn load_document(&self) -> Result<Option<serde_json::Value>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("failed to read session file", e)),
        };
        let document = serde_json::from_slice(&bytes)
            .map_err(|e| storage_error("session file is not valid JSON", e))?;
        Ok(Some(document))
    }

    async fn save_document(&self, document: &serde_json::Value) -> Result<(), DomainError> {
        let content = serde_json::to_vec_pretty(document)
            .map_err(|e| storage_error("failed to encode session", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("failed to create session directory", e))?;
        }

        let tmp_path = self.temp_path();
        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(&content).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp_path, &self.path).await?;
            Ok::<(), std::io::Error>(())
        }
        .await;

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(storage_error("failed to write session file", e));
        }

        sync_parent_dir(&self.path)
            .await
            .map_err(|e| storage_error("failed to sync session directory", e))?;

        debug!(path = %self.path.display(), bytes = content.len(), "session saved");
        Ok(())
    }
}
