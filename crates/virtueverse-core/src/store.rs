//! Session document storage abstraction.

use async_trait::async_trait;

use crate::error::DomainError;

/// Storage for the single persisted session document.
///
/// Implementations must replace the document atomically: a concurrent
/// `load_document` sees either the previous document or the new one, never a
/// partial write.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted document, or `None` if nothing has been saved yet.
    async fn load_document(&self) -> Result<Option<serde_json::Value>, DomainError>;

    /// Overwrite the persisted document.
    async fn save_document(&self, document: &serde_json::Value) -> Result<(), DomainError>;
}
