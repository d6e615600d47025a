//! Driving ports for the task operations.

use async_trait::async_trait;
use board_core::{CreateTaskBody, TaskDeleted, TaskMutation, TaskPayload, UpdateTaskBody};
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// Request to create a task on behalf of `actor`.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    /// Authenticated acting identity.
    pub actor: UserId,
    /// Creation input; only the title is required.
    pub body: CreateTaskBody,
}

/// Request to apply a partial update to one task.
#[derive(Debug, Clone)]
pub struct UpdateTaskRequest {
    /// Authenticated acting identity.
    pub actor: UserId,
    /// Target task.
    pub id: Uuid,
    /// The fields to change.
    pub body: UpdateTaskBody,
}

/// Request to delete one task.
#[derive(Debug, Clone)]
pub struct DeleteTaskRequest {
    /// Authenticated acting identity.
    pub actor: UserId,
    /// Target task.
    pub id: Uuid,
}

/// Driving port for task mutations.
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Create a task; returns it with server-assigned id and timestamps.
    async fn create_task(&self, request: CreateTaskRequest) -> Result<TaskMutation, Error>;

    /// Apply a partial update; returns the full updated representation.
    async fn update_task(&self, request: UpdateTaskRequest) -> Result<TaskMutation, Error>;

    /// Delete a task; creator only.
    async fn delete_task(&self, request: DeleteTaskRequest) -> Result<TaskDeleted, Error>;
}

/// Driving port for task reads.
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// All tasks, newest first, with identity references resolved.
    async fn list_tasks(&self) -> Result<Vec<TaskPayload>, Error>;
}
