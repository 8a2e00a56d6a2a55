//! Mock `StateStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use virtueverse_core::error::DomainError;
use virtueverse_core::store::StateStore;

/// An in-memory store that keeps the latest document and counts saves.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    document: Mutex<Option<Value>>,
    saves: Mutex<usize>,
}

impl InMemoryStateStore {
    /// Create an empty store; the first load will see no document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `document`.
    #[must_use]
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            saves: Mutex::new(0),
        }
    }

    /// Returns a copy of the stored document.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn document(&self) -> Option<Value> {
        self.document.lock().unwrap().clone()
    }

    /// Returns how many times `save_document` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load_document(&self) -> Result<Option<Value>, DomainError> {
        Ok(self.document.lock().unwrap().clone())
    }

    async fn save_document(&self, document: &Value) -> Result<(), DomainError> {
        *self.document.lock().unwrap() = Some(document.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A store that always returns a storage error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingStateStore;

#[async_trait]
impl StateStore for FailingStateStore {
    async fn load_document(&self) -> Result<Option<Value>, DomainError> {
        Err(DomainError::Storage("permission denied".into()))
    }

    async fn save_document(&self, _document: &Value) -> Result<(), DomainError> {
        Err(DomainError::Storage("permission denied".into()))
    }
}

/// A store that serves a fixed document but refuses every write.
#[derive(Debug)]
pub struct UnwritableStateStore {
    document: Option<Value>,
}

impl UnwritableStateStore {
    /// Create a store that loads `document` and fails on save.
    #[must_use]
    pub fn new(document: Option<Value>) -> Self {
        Self { document }
    }
}

#[async_trait]
impl StateStore for UnwritableStateStore {
    async fn load_document(&self) -> Result<Option<Value>, DomainError> {
        Ok(self.document.clone())
    }

    async fn save_document(&self, _document: &Value) -> Result<(), DomainError> {
        Err(DomainError::Storage("read-only file system".into()))
    }
}
