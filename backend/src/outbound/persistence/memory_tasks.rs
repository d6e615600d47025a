//! In-memory task repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::Task;
use crate::domain::ports::{TaskRepository, TaskRepositoryError};

/// Task storage backed by a map under an async lock.
///
/// Each mutation takes the write lock once, so a mutation touches exactly
/// one task atomically and writes are last-write-wins per record.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl InMemoryTaskRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: Task) -> Result<(), TaskRepositoryError> {
        self.tasks.write().await.insert(task.id(), task);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn save(&self, task: Task) -> Result<(), TaskRepositoryError> {
        self.tasks.write().await.insert(task.id(), task);
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool, TaskRepositoryError> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn list_newest_first(&self) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        // Tie-break on id so the ordering is stable when timestamps collide.
        tasks.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(tasks)
    }
}
