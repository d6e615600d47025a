//! Port for task persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Task;

/// Errors raised by task repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskRepositoryError {
    /// The backing store could not be reached.
    #[error("task repository unavailable: {message}")]
    Unavailable {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl TaskRepositoryError {
    /// Convenience constructor for [`TaskRepositoryError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for reading and writing task records, keyed by task id.
///
/// Each call touches exactly one record (or the whole list) atomically with
/// respect to the adapter's own synchronisation; there are no cross-task
/// transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a freshly created task.
    async fn insert(&self, task: Task) -> Result<(), TaskRepositoryError>;

    /// Find a task by id.
    async fn find(&self, id: Uuid) -> Result<Option<Task>, TaskRepositoryError>;

    /// Replace a task's stored state. Last write wins.
    async fn save(&self, task: Task) -> Result<(), TaskRepositoryError>;

    /// Remove a task. Returns whether a record existed.
    async fn remove(&self, id: Uuid) -> Result<bool, TaskRepositoryError>;

    /// All tasks, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Task>, TaskRepositoryError>;
}
