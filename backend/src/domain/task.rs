//! The task aggregate.
//!
//! Completion is stored as a single optional [`Completion`] value, so the
//! `completed ⇔ status == done ⇔ attribution present` invariants hold by
//! construction. The redundant legacy boolean exists only on the wire and is
//! derived when the aggregate is turned into a payload.

use board_core::{CompletionEffect, Recurrence, TaskPayload, TaskStatus, UserRef};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors raised by task constructors and mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// The title is empty once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Completion attribution, present exactly while a task is `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Who moved the task into `done`.
    pub by: UserId,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// Input payload for [`Task::create`].
#[derive(Debug, Clone)]
pub struct TaskDraft {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Raw title; trimmed and validated.
    pub title: String,
    /// Optional notes.
    pub details: Option<String>,
    /// Starting column.
    pub status: TaskStatus,
    /// Descriptive recurrence tag.
    pub recurring: Option<Recurrence>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Creator; holds edit and delete rights.
    pub creator: UserId,
    /// Optional assignee.
    pub assigned_to: Option<UserId>,
}

/// A persisted task with its authorization and completion rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: Uuid,
    title: String,
    details: Option<String>,
    status: TaskStatus,
    recurring: Option<Recurrence>,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    creator: UserId,
    assigned_to: Option<UserId>,
    completion: Option<Completion>,
}

fn validate_title(raw: String) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

impl Task {
    /// Create a validated task.
    ///
    /// A task created directly in `done` is attributed to its creator at the
    /// creation timestamp.
    pub fn create(draft: TaskDraft) -> Result<Self, TaskValidationError> {
        let title = validate_title(draft.title)?;
        let completion = draft.status.is_done().then_some(Completion {
            by: draft.creator,
            at: draft.created_at,
        });
        Ok(Self {
            id: draft.id,
            title,
            details: draft.details,
            status: draft.status,
            recurring: draft.recurring,
            due_date: draft.due_date,
            created_at: draft.created_at,
            creator: draft.creator,
            assigned_to: draft.assigned_to,
            completion,
        })
    }

    /// Task identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Legacy completion flag, derived from the status.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.status.is_done()
    }

    /// Completion attribution, present exactly while the task is `done`.
    #[must_use]
    pub const fn completion(&self) -> Option<Completion> {
        self.completion
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The creator's identifier.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// The current assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Whether `user` created this task.
    #[must_use]
    pub fn is_creator(&self, user: UserId) -> bool {
        self.creator == user
    }

    /// Whether `user` is the current assignee.
    #[must_use]
    pub fn is_assignee(&self, user: UserId) -> bool {
        self.assigned_to == Some(user)
    }

    /// Only the creator may change descriptive fields.
    #[must_use]
    pub fn may_edit_details(&self, user: UserId) -> bool {
        self.is_creator(user)
    }

    /// The creator or the current assignee may change status.
    #[must_use]
    pub fn may_change_status(&self, user: UserId) -> bool {
        self.is_creator(user) || self.is_assignee(user)
    }

    /// Only the creator may delete the task.
    #[must_use]
    pub fn may_delete(&self, user: UserId) -> bool {
        self.is_creator(user)
    }

    /// Replace the title, trimming and rejecting empty input.
    pub fn rename(&mut self, title: String) -> Result<(), TaskValidationError> {
        self.title = validate_title(title)?;
        Ok(())
    }

    /// Replace or clear the notes.
    pub fn set_details(&mut self, details: Option<String>) {
        self.details = details;
    }

    /// Replace or clear the recurrence tag.
    pub fn set_recurring(&mut self, recurring: Option<Recurrence>) {
        self.recurring = recurring;
    }

    /// Replace or clear the due date.
    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }

    /// Reassign or unassign the task. Assignment never removes creator
    /// ownership.
    pub fn set_assignee(&mut self, assignee: Option<UserId>) {
        self.assigned_to = assignee;
    }

    /// Move the task to `status`, applying the completion side effects.
    ///
    /// Entering `done` stamps the acting user and `now`; leaving `done`
    /// clears the attribution; re-entering `done` changes nothing.
    pub fn set_status(&mut self, status: TaskStatus, actor: UserId, now: DateTime<Utc>) {
        match CompletionEffect::between(self.status, status) {
            CompletionEffect::Enter => self.completion = Some(Completion { by: actor, at: now }),
            CompletionEffect::Leave => self.completion = None,
            CompletionEffect::Unchanged => {}
        }
        self.status = status;
    }

    /// Assemble the wire payload, with identity references resolved by the
    /// caller.
    #[must_use]
    pub fn payload(
        &self,
        creator: UserRef,
        assigned_to: Option<UserRef>,
        completed_by: Option<UserRef>,
    ) -> TaskPayload {
        TaskPayload {
            id: self.id,
            title: self.title.clone(),
            details: self.details.clone(),
            status: self.status,
            completed: self.completed(),
            recurring: self.recurring.clone(),
            due_date: self.due_date,
            created_at: self.created_at,
            user: creator,
            assigned_to,
            completed_by,
            completed_at: self.completion.map(|completion| completion.at),
        }
    }
}
