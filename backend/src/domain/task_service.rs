//! Task domain service.
//!
//! Implements the driving ports on top of the driven ones: authorization,
//! title validation, authoritative completion side effects, badge
//! accounting, and identity resolution all happen here, so inbound adapters
//! stay thin and adapters stay dumb.

use std::sync::Arc;

use async_trait::async_trait;
use board_core::{
    CompletionEffect, CreateTaskBody, TaskDeleted, TaskMutation, TaskPayload, UpdateTaskBody,
    UserRef, resolve_target_status,
};
use chrono::Utc;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    BadgeLedger, BadgeLedgerError, BadgeNotifier, BadgesEarned, CreateTaskRequest,
    DeleteTaskRequest, TaskCommand, TaskQuery, TaskRepository, TaskRepositoryError,
    UpdateTaskRequest, UserDirectory, UserDirectoryError,
};
use crate::domain::{Error, Task, TaskDraft, TaskValidationError, User, UserId};

fn map_repository_error(error: TaskRepositoryError) -> Error {
    match error {
        TaskRepositoryError::Unavailable { message } => {
            Error::service_unavailable(format!("task repository unavailable: {message}"))
        }
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Unavailable { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
    }
}

fn map_ledger_error(error: BadgeLedgerError) -> Error {
    match error {
        BadgeLedgerError::Unavailable { message } => {
            Error::service_unavailable(format!("badge ledger unavailable: {message}"))
        }
    }
}

fn map_validation_error(error: TaskValidationError) -> Error {
    match error {
        TaskValidationError::EmptyTitle => Error::invalid_request("title must not be empty")
            .with_details(json!({ "field": "title", "code": "empty_title" })),
    }
}

/// Badge bookkeeping owed once a task write has been persisted.
///
/// The ledger and the announcement bus are only touched after the repository
/// accepted the write; a failed save must not inflate tallies or broadcast
/// badges for a mutation the caller saw fail.
enum CompletionSettlement {
    /// The task entered `done`: record the completion for `actor`.
    Award {
        /// Who completed the task.
        actor: UserId,
    },
    /// The task left `done`: take the completion back from its completer.
    Retract {
        /// Who had been credited.
        completer: UserId,
    },
    /// The transition did not cross the `done` boundary.
    None,
}

/// Service implementing [`TaskCommand`] and [`TaskQuery`].
pub struct TaskService<R, D, L> {
    tasks: Arc<R>,
    members: Arc<D>,
    badges: Arc<L>,
    notifier: Arc<dyn BadgeNotifier>,
}

impl<R, D, L> TaskService<R, D, L> {
    /// Wire the service to its driven ports.
    pub fn new(
        tasks: Arc<R>,
        members: Arc<D>,
        badges: Arc<L>,
        notifier: Arc<dyn BadgeNotifier>,
    ) -> Self {
        Self {
            tasks,
            members,
            badges,
            notifier,
        }
    }
}

impl<R, D, L> TaskService<R, D, L>
where
    R: TaskRepository,
    D: UserDirectory,
    L: BadgeLedger,
{
    /// Resolve the acting identity or reject the write.
    async fn require_member(&self, actor: UserId) -> Result<User, Error> {
        self.members
            .find(actor)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::unauthorized("acting user is not a known household member"))
    }

    /// Resolve an assignee supplied by the client, or reject the input.
    async fn assignee_or_invalid(&self, raw: Uuid) -> Result<User, Error> {
        self.members
            .find(UserId::from(raw))
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| {
                Error::invalid_request("assignee is not a known household member").with_details(
                    json!({ "field": "assignedToId", "value": raw.to_string() }),
                )
            })
    }

    /// Wire reference for a member a stored task points at.
    async fn member_ref(&self, id: UserId) -> Result<UserRef, Error> {
        self.members
            .find(id)
            .await
            .map_err(map_directory_error)?
            .map(|user| user.to_ref())
            .ok_or_else(|| Error::internal(format!("task references unknown member {id}")))
    }

    /// Assemble the payload for a stored task, relations resolved.
    async fn resolve_payload(&self, task: &Task) -> Result<TaskPayload, Error> {
        let creator = self.member_ref(task.creator()).await?;
        let assigned_to = match task.assigned_to() {
            Some(id) => Some(self.member_ref(id).await?),
            None => None,
        };
        let completed_by = match task.completion() {
            Some(completion) => Some(self.member_ref(completion.by).await?),
            None => None,
        };
        Ok(task.payload(creator, assigned_to, completed_by))
    }

    /// Record a completion and announce newly earned badges, if any.
    async fn award_completion(&self, actor: UserId) -> Result<Vec<String>, Error> {
        let earned = self
            .badges
            .record_completion(actor)
            .await
            .map_err(map_ledger_error)?;
        if !earned.is_empty() {
            self.notifier.announce(BadgesEarned {
                user: actor,
                badges: earned.clone(),
            });
        }
        Ok(earned)
    }

    /// Apply the creator-only fields of a patch.
    async fn apply_descriptive_fields(
        &self,
        task: &mut Task,
        body: &UpdateTaskBody,
    ) -> Result<(), Error> {
        if let Some(title) = body.title.clone() {
            task.rename(title).map_err(map_validation_error)?;
        }
        if let Some(details) = body.details.clone() {
            task.set_details(details);
        }
        if let Some(assigned) = body.assigned_to_id {
            let assignee = match assigned {
                Some(raw) => Some(self.assignee_or_invalid(raw).await?.id),
                None => None,
            };
            task.set_assignee(assignee);
        }
        if let Some(recurring) = body.recurring.clone() {
            task.set_recurring(recurring);
        }
        if let Some(due_date) = body.due_date {
            task.set_due_date(due_date);
        }
        Ok(())
    }

    /// Apply the status/completion part of a patch to the aggregate and
    /// return the badge bookkeeping to settle once the write is persisted.
    ///
    /// The target status is computed server-side from the patch and the
    /// stored state, so a client's optimistic guess never decides who gets
    /// the completion attribution.
    fn apply_progress_fields(
        task: &mut Task,
        body: &UpdateTaskBody,
        actor: UserId,
    ) -> CompletionSettlement {
        let target = resolve_target_status(task.status(), body.status, body.completed);
        let effect = CompletionEffect::between(task.status(), target);
        let previous_completer = task.completion().map(|completion| completion.by);
        task.set_status(target, actor, Utc::now());
        match effect {
            CompletionEffect::Enter => CompletionSettlement::Award { actor },
            CompletionEffect::Leave => previous_completer
                .map_or(CompletionSettlement::None, |completer| {
                    CompletionSettlement::Retract { completer }
                }),
            CompletionEffect::Unchanged => CompletionSettlement::None,
        }
    }

    /// Settle the badge bookkeeping for a persisted write.
    async fn settle_completion(
        &self,
        settlement: CompletionSettlement,
    ) -> Result<Vec<String>, Error> {
        match settlement {
            CompletionSettlement::Award { actor } => self.award_completion(actor).await,
            CompletionSettlement::Retract { completer } => {
                self.badges
                    .record_uncompletion(completer)
                    .await
                    .map_err(map_ledger_error)?;
                Ok(Vec::new())
            }
            CompletionSettlement::None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl<R, D, L> TaskCommand for TaskService<R, D, L>
where
    R: TaskRepository,
    D: UserDirectory,
    L: BadgeLedger,
{
    async fn create_task(&self, request: CreateTaskRequest) -> Result<TaskMutation, Error> {
        let CreateTaskRequest { actor, body } = request;
        let creator = self.require_member(actor).await?;
        let assignee = match body.assigned_to_id {
            Some(raw) => Some(self.assignee_or_invalid(raw).await?),
            None => None,
        };

        let CreateTaskBody {
            title,
            details,
            recurring,
            due_date,
            status,
            ..
        } = body;
        let task = Task::create(TaskDraft {
            id: Uuid::new_v4(),
            title,
            details,
            status: status.unwrap_or_default(),
            recurring,
            due_date,
            created_at: Utc::now(),
            creator: actor,
            assigned_to: assignee.as_ref().map(|user| user.id),
        })
        .map_err(map_validation_error)?;

        self.tasks
            .insert(task.clone())
            .await
            .map_err(map_repository_error)?;
        debug!(task_id = %task.id(), actor = %actor, "task created");

        let earned_badges = if task.completed() {
            self.award_completion(actor).await?
        } else {
            Vec::new()
        };

        let completed_by = task.completed().then(|| creator.to_ref());
        let payload = task.payload(
            creator.to_ref(),
            assignee.map(|user| user.to_ref()),
            completed_by,
        );
        Ok(TaskMutation {
            task: payload,
            earned_badges,
        })
    }

    async fn update_task(&self, request: UpdateTaskRequest) -> Result<TaskMutation, Error> {
        let UpdateTaskRequest { actor, id, body } = request;
        self.require_member(actor).await?;
        if body.is_empty() {
            return Err(Error::invalid_request("update must change at least one field"));
        }

        let mut task = self
            .tasks
            .find(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("task {id} not found")))?;

        if body.touches_descriptive_fields() && !task.may_edit_details(actor) {
            return Err(Error::forbidden(
                "only the creator may edit a task's descriptive fields",
            ));
        }
        if body.touches_progress_fields() && !task.may_change_status(actor) {
            return Err(Error::forbidden(
                "only the creator or the assignee may change a task's status",
            ));
        }

        self.apply_descriptive_fields(&mut task, &body).await?;
        let settlement = if body.touches_progress_fields() {
            Self::apply_progress_fields(&mut task, &body, actor)
        } else {
            CompletionSettlement::None
        };

        self.tasks
            .save(task.clone())
            .await
            .map_err(map_repository_error)?;
        debug!(task_id = %id, actor = %actor, "task updated");
        let earned_badges = self.settle_completion(settlement).await?;

        let payload = self.resolve_payload(&task).await?;
        Ok(TaskMutation {
            task: payload,
            earned_badges,
        })
    }

    async fn delete_task(&self, request: DeleteTaskRequest) -> Result<TaskDeleted, Error> {
        let DeleteTaskRequest { actor, id } = request;
        self.require_member(actor).await?;
        let task = self
            .tasks
            .find(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("task {id} not found")))?;
        if !task.may_delete(actor) {
            return Err(Error::forbidden("only the creator may delete a task"));
        }

        self.tasks.remove(id).await.map_err(map_repository_error)?;
        debug!(task_id = %id, actor = %actor, "task deleted");
        Ok(TaskDeleted { id, deleted: true })
    }
}

#[async_trait]
impl<R, D, L> TaskQuery for TaskService<R, D, L>
where
    R: TaskRepository,
    D: UserDirectory,
    L: BadgeLedger,
{
    async fn list_tasks(&self) -> Result<Vec<TaskPayload>, Error> {
        let tasks = self
            .tasks
            .list_newest_first()
            .await
            .map_err(map_repository_error)?;
        let mut payloads = Vec::with_capacity(tasks.len());
        for task in &tasks {
            payloads.push(self.resolve_payload(task).await?);
        }
        Ok(payloads)
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
