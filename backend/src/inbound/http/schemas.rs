//! OpenAPI schema definitions for wire types.
//!
//! The shared wire types in `board-core` stay framework-agnostic by not
//! deriving `ToSchema`; these wrappers mirror their shapes for the OpenAPI
//! document and live in the inbound adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = board_core::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing collaborator is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = board_core::ErrorBody, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title must not be empty")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "0c6e4e9e-8647-4f3e-9f24-1f5bb8f37a6c")]
    trace_id: Option<String>,
    /// Supplementary structured details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`board_core::TaskStatus`].
#[derive(ToSchema)]
#[schema(as = board_core::TaskStatus)]
pub enum TaskStatusSchema {
    /// Waiting in the first column.
    #[schema(rename = "todo")]
    Todo,
    /// Being worked on.
    #[schema(rename = "in_progress")]
    InProgress,
    /// Finished; carries completion attribution.
    #[schema(rename = "done")]
    Done,
}

/// OpenAPI schema for [`board_core::UserRef`].
#[derive(ToSchema)]
#[schema(as = board_core::UserRef, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserRefSchema {
    /// Stable member identifier.
    #[schema(value_type = uuid::Uuid)]
    id: String,
    /// Name shown on task cards.
    #[schema(example = "Maja")]
    display_name: String,
}

/// OpenAPI schema for [`board_core::TaskPayload`].
#[derive(ToSchema)]
#[schema(as = board_core::TaskPayload, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskPayloadSchema {
    /// Server-assigned identifier, immutable.
    #[schema(value_type = uuid::Uuid)]
    id: String,
    /// Non-empty after trimming.
    #[schema(example = "Buy firewood")]
    title: String,
    /// Optional free-form notes.
    details: Option<String>,
    /// Kanban column.
    status: TaskStatusSchema,
    /// Legacy mirror of `status == done`.
    completed: bool,
    /// Descriptive recurrence tag; any non-empty string is accepted.
    #[schema(example = "weekly")]
    recurring: Option<String>,
    /// Optional due date; anchors the recurrence label when present.
    #[schema(format = "date-time")]
    due_date: Option<String>,
    /// Creation timestamp, immutable.
    #[schema(format = "date-time")]
    created_at: String,
    /// Creator; holds edit and delete rights.
    user: UserRefSchema,
    /// Optional assignee.
    assigned_to: Option<UserRefSchema>,
    /// Who moved the task into `done`; present exactly while done.
    completed_by: Option<UserRefSchema>,
    /// When the task entered `done`.
    #[schema(format = "date-time")]
    completed_at: Option<String>,
}

/// OpenAPI schema for [`board_core::CreateTaskBody`].
#[derive(ToSchema)]
#[schema(as = board_core::CreateTaskBody, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateTaskBodySchema {
    /// Must be non-empty after trimming.
    #[schema(example = "Buy firewood")]
    title: String,
    /// Optional free-form notes.
    details: Option<String>,
    /// Assign to another household member at creation.
    #[schema(value_type = Option<uuid::Uuid>)]
    assigned_to_id: Option<String>,
    /// Descriptive recurrence tag.
    #[schema(example = "weekly")]
    recurring: Option<String>,
    /// Optional due date.
    #[schema(format = "date-time")]
    due_date: Option<String>,
    /// Starting column; defaults to `todo`.
    status: Option<TaskStatusSchema>,
}

/// OpenAPI schema for [`board_core::UpdateTaskBody`].
///
/// Nullable fields distinguish "absent" from an explicit `null` clearing
/// the value.
#[derive(ToSchema)]
#[schema(as = board_core::UpdateTaskBody, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateTaskBodySchema {
    /// New title; must be non-empty after trimming.
    title: Option<String>,
    /// Replace or clear the notes.
    details: Option<String>,
    /// Reassign or unassign the task.
    #[schema(value_type = Option<uuid::Uuid>)]
    assigned_to_id: Option<String>,
    /// Replace or clear the recurrence tag.
    recurring: Option<String>,
    /// Replace or clear the due date.
    #[schema(format = "date-time")]
    due_date: Option<String>,
    /// Move the task to another column.
    status: Option<TaskStatusSchema>,
    /// Legacy completion toggle; an explicit `status` wins over it.
    completed: Option<bool>,
}

/// OpenAPI schema for [`board_core::TaskMutation`].
#[derive(ToSchema)]
#[schema(as = board_core::TaskMutation, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskMutationSchema {
    /// Full task representation after the mutation.
    task: TaskPayloadSchema,
    /// Identifiers of badges newly earned by the acting user.
    #[schema(example = json!(["first-task-done"]))]
    earned_badges: Vec<String>,
}

/// OpenAPI schema for [`board_core::TaskDeleted`].
#[derive(ToSchema)]
#[schema(as = board_core::TaskDeleted, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskDeletedSchema {
    /// Identifier of the removed task.
    #[schema(value_type = uuid::Uuid)]
    id: String,
    /// Always true on success.
    deleted: bool,
}
