//! Port over the remote task store.

use async_trait::async_trait;
use board_core::{CreateTaskBody, TaskDeleted, TaskMutation, TaskPayload, UpdateTaskBody};
use uuid::Uuid;

/// Errors surfaced by remote store adapters.
///
/// The variants mirror the server's error taxonomy closely enough for the
/// store to pick a recovery strategy; the message keeps the server's
/// human-readable text when one was decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteTasksError {
    /// The server rejected the input (HTTP 400).
    #[error("request rejected: {message}")]
    Validation {
        /// Server-provided description.
        message: String,
    },
    /// No session, or the session is no longer valid (HTTP 401).
    #[error("not authenticated: {message}")]
    Unauthorized {
        /// Server-provided description.
        message: String,
    },
    /// The acting member is not permitted (HTTP 403).
    #[error("not permitted: {message}")]
    Forbidden {
        /// Server-provided description.
        message: String,
    },
    /// The task no longer exists (HTTP 404).
    #[error("not found: {message}")]
    NotFound {
        /// Server-provided description.
        message: String,
    },
    /// The response body was not the expected JSON shape.
    #[error("invalid response payload: {message}")]
    Decode {
        /// Decoder failure description.
        message: String,
    },
    /// The request never completed, or the server failed outright.
    #[error("transport failure: {message}")]
    Transport {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl RemoteTasksError {
    /// Convenience constructor for [`RemoteTasksError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RemoteTasksError::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RemoteTasksError::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RemoteTasksError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RemoteTasksError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`RemoteTasksError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Port the synchronisation store drives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteTasks: Send + Sync {
    /// All tasks, newest first.
    async fn list(&self) -> Result<Vec<TaskPayload>, RemoteTasksError>;

    /// Create a task; the server assigns id and timestamps.
    async fn create(&self, body: CreateTaskBody) -> Result<TaskMutation, RemoteTasksError>;

    /// Apply a partial update to one task.
    async fn update(
        &self,
        id: Uuid,
        body: UpdateTaskBody,
    ) -> Result<TaskMutation, RemoteTasksError>;

    /// Delete one task.
    async fn delete(&self, id: Uuid) -> Result<TaskDeleted, RemoteTasksError>;
}
