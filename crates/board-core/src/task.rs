//! Wire payloads for the task operations.
//!
//! Field names follow the board's JSON contract (camelCase). The redundant
//! `completed` boolean rides alongside `status` for older display code;
//! producers must keep it equal to `status == done`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Recurrence, TaskStatus};

/// Resolved reference to a household member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    /// Stable member identifier.
    pub id: Uuid,
    /// Name shown on task cards.
    pub display_name: String,
}

/// Full task representation exchanged between the remote store and clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Server-assigned identifier, immutable.
    pub id: Uuid,
    /// Non-empty after trimming.
    pub title: String,
    /// Optional free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Kanban column.
    pub status: TaskStatus,
    /// Legacy mirror of `status == done`.
    pub completed: bool,
    /// Descriptive recurrence tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
    /// Anchor for recurrence labels when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp, immutable; fallback recurrence anchor.
    pub created_at: DateTime<Utc>,
    /// Creator; holds edit and delete rights.
    pub user: UserRef,
    /// Optional assignee; may change status but not descriptive fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserRef>,
    /// Who moved the task into `done`; present exactly while it is done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<UserRef>,
    /// When the task entered `done`; set and cleared with `completed_by`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskPayload {
    /// Anchor date used when formatting the recurrence label.
    #[must_use]
    pub fn recurrence_anchor(&self) -> DateTime<Utc> {
        self.due_date.unwrap_or(self.created_at)
    }

    /// Human-readable recurrence label, when the task recurs.
    #[must_use]
    pub fn recurrence_label(&self) -> Option<String> {
        self.recurring
            .as_ref()
            .map(|tag| tag.label(Some(self.recurrence_anchor())))
    }

    /// Whether the payload satisfies the completion invariants.
    #[must_use]
    pub fn completion_consistent(&self) -> bool {
        let done = self.status.is_done();
        self.completed == done
            && self.completed_by.is_some() == done
            && self.completed_at.is_some() == done
    }
}

/// Input for task creation. The title is the only required field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Must be non-empty after trimming.
    pub title: String,
    /// Optional free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Assign to another household member at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<Uuid>,
    /// Descriptive recurrence tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
    /// Optional due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Starting column; defaults to `todo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl CreateTaskBody {
    /// Minimal creation input: a title and nothing else.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a task's mutable fields.
///
/// Nullable fields use `Option<Option<T>>`: the outer `None` means the field
/// was absent from the patch, `Some(None)` means an explicit null clearing
/// the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// New title; must be non-empty after trimming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replace or clear the notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Option<String>>,
    /// Reassign or unassign the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<Option<Uuid>>,
    /// Replace or clear the recurrence tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Option<Recurrence>>,
    /// Replace or clear the due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Move the task to another column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Legacy completion toggle; an explicit `status` wins over it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTaskBody {
    /// Whether the patch touches fields only the creator may change.
    #[must_use]
    pub fn touches_descriptive_fields(&self) -> bool {
        self.title.is_some()
            || self.details.is_some()
            || self.assigned_to_id.is_some()
            || self.recurring.is_some()
            || self.due_date.is_some()
    }

    /// Whether the patch touches status or the legacy completion flag.
    #[must_use]
    pub fn touches_progress_fields(&self) -> bool {
        self.status.is_some() || self.completed.is_some()
    }

    /// Whether the patch changes nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.touches_descriptive_fields() && !self.touches_progress_fields()
    }
}

/// Mutation response: ground-truth task plus the badges the acting user
/// newly earned from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMutation {
    /// Full task representation after the mutation, relations resolved.
    pub task: TaskPayload,
    /// Identifiers of badges newly earned by the acting user, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub earned_badges: Vec<String>,
}

/// Deletion acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDeleted {
    /// Identifier of the removed task.
    pub id: Uuid,
    /// Always true on success; deletion is immediate and irreversible.
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn update_body_distinguishes_absent_from_null() {
        let patch: UpdateTaskBody =
            serde_json::from_value(json!({ "details": null })).expect("deserialise");
        assert_eq!(patch.details, Some(None));
        assert_eq!(patch.title, None);

        let empty: UpdateTaskBody = serde_json::from_value(json!({})).expect("deserialise");
        assert!(empty.is_empty());
    }

    #[test]
    fn update_body_classifies_fields_by_required_permission() {
        let descriptive = UpdateTaskBody {
            title: Some("Sweep the porch".to_owned()),
            ..UpdateTaskBody::default()
        };
        assert!(descriptive.touches_descriptive_fields());
        assert!(!descriptive.touches_progress_fields());

        let progress = UpdateTaskBody {
            completed: Some(true),
            ..UpdateTaskBody::default()
        };
        assert!(!progress.touches_descriptive_fields());
        assert!(progress.touches_progress_fields());
    }

    #[test]
    fn unknown_status_in_a_patch_coerces_instead_of_failing() {
        let patch: UpdateTaskBody =
            serde_json::from_value(json!({ "status": "archived" })).expect("total deserialise");
        assert_eq!(patch.status, Some(TaskStatus::Todo));
    }

    #[test]
    fn payload_serialises_camel_case_and_omits_absent_fields() {
        let payload = TaskPayload {
            id: Uuid::nil(),
            title: "Buy firewood".to_owned(),
            details: None,
            status: TaskStatus::Todo,
            completed: false,
            recurring: None,
            due_date: None,
            created_at: DateTime::UNIX_EPOCH,
            user: UserRef {
                id: Uuid::nil(),
                display_name: "Maja".to_owned(),
            },
            assigned_to: None,
            completed_by: None,
            completed_at: None,
        };
        let value = serde_json::to_value(&payload).expect("serialise");
        assert_eq!(value["createdAt"], json!("1970-01-01T00:00:00Z"));
        assert!(value.get("completedBy").is_none());
        assert!(value.get("details").is_none());
        assert!(payload.completion_consistent());
    }

    #[test]
    fn recurrence_label_prefers_due_date_over_created_at() {
        let created: DateTime<Utc> = "2026-03-02T09:00:00Z".parse().expect("timestamp");
        let due: DateTime<Utc> = "2026-03-06T09:00:00Z".parse().expect("timestamp");
        let mut payload = TaskPayload {
            id: Uuid::nil(),
            title: "Water the plants".to_owned(),
            details: None,
            status: TaskStatus::Todo,
            completed: false,
            recurring: Some(Recurrence::Weekly),
            due_date: Some(due),
            created_at: created,
            user: UserRef {
                id: Uuid::nil(),
                display_name: "Maja".to_owned(),
            },
            assigned_to: None,
            completed_by: None,
            completed_at: None,
        };
        // 2026-03-06 is a Friday, 2026-03-02 a Monday.
        assert_eq!(payload.recurrence_label().as_deref(), Some("Weekly on Friday"));
        payload.due_date = None;
        assert_eq!(payload.recurrence_label().as_deref(), Some("Weekly on Monday"));
    }
}
