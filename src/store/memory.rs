//! Thread-safe in-memory task store.
//!
//! Records live in an insertion-ordered map behind a `parking_lot` RwLock,
//! so `list()` (and therefore `task/query`) returns tasks in creation
//! order. Ids are UUIDv4 strings, which guarantees an id is never reused
//! after deletion.

use indexmap::IndexMap;
use parking_lot::RwLock;
use uuid::Uuid;

use async_trait::async_trait;

use super::{StoreError, TaskPatch, TaskStore};
use crate::types::Task;

/// In-memory [`TaskStore`] implementation.
///
/// # Examples
///
/// ```
/// use jmaplite::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tasks: RwLock<IndexMap<String, Task>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of persisted tasks.
    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    /// Returns `true` if the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Task, StoreError> {
        self.tasks
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn create(&self, title: &str) -> Result<Task, StoreError> {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            is_completed: false,
        };
        self.tasks.write().insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write();
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(is_completed) = patch.is_completed {
            task.is_completed = is_completed;
        }
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        // shift_remove keeps listing order stable for the survivors.
        match self.tasks.write().shift_remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }
}
