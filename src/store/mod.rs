//! Task store contract and implementations.
//!
//! The protocol core talks to persistence exclusively through the
//! [`TaskStore`] trait: a narrow CRUD interface whose operations either
//! succeed or fail with a typed condition. Not-found is deliberately
//! distinct from generic backend failure; the two have different
//! client-facing meanings (`notFound` vs `serverFail` in set outcomes).
//!
//! [`InMemoryStore`](memory::InMemoryStore) is the bundled implementation.
//! Cross-request concurrency control is the store's responsibility; the
//! dispatcher only assumes read-after-write consistency for its own
//! sequential operations within one batch.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryStore;

use crate::types::Task;

/// Typed failure conditions for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the given id.
    #[error("task not found: {id}")]
    NotFound {
        /// The id that was not found.
        id: String,
    },

    /// The backend failed (I/O, timeout, corruption).
    #[error("storage backend error: {message}")]
    Backend {
        /// Human-readable description of the failure.
        message: String,
    },
}

/// A partial update: only the fields present are applied, everything else
/// is left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title, if given. Must be non-empty.
    pub title: Option<String>,
    /// Replacement completion flag, if given.
    pub is_completed: Option<bool>,
}

/// CRUD contract over persisted task records.
///
/// Implementations must be `Send + Sync`; they are shared across request
/// handlers behind an `Arc<dyn TaskStore>`.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns all tasks in the store's listing order.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failure.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Resolves a single task by id.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no record exists for `id`.
    /// - [`StoreError::Backend`] on storage failure.
    async fn get(&self, id: &str) -> Result<Task, StoreError>;

    /// Creates a task with the given title, assigning a fresh unique id.
    ///
    /// The new task starts with `is_completed == false`. Ids are never
    /// reused, even after deletion.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failure.
    async fn create(&self, title: &str) -> Result<Task, StoreError>;

    /// Applies a partial update and returns the resulting task.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no record exists for `id`.
    /// - [`StoreError::Backend`] on storage failure.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError>;

    /// Deletes a task by id.
    ///
    /// Deleting an unknown id fails with `NotFound` so callers can report
    /// it; it is never silently ignored.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no record exists for `id`.
    /// - [`StoreError::Backend`] on storage failure.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
