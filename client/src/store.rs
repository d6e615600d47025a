//! Optimistic synchronisation store for the task board.
//!
//! The store keeps a local copy of the board and applies each mutation in
//! two phases: an optimistic local guess so the UI answers immediately, then
//! the server's response as ground truth. When a call fails the optimistic
//! state is rolled back, either from a snapshot taken before the guess or by
//! reloading the whole board, so a settled call never leaves a stale guess
//! behind.

use board_core::{
    CompletionEffect, CreateTaskBody, Recurrence, TaskMutation, TaskPayload, TaskStatus,
    UpdateTaskBody, UserRef,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::remote::{RemoteTasks, RemoteTasksError};

/// Buffered badge announcements per receiver.
const BADGE_CHANNEL_CAPACITY: usize = 8;

/// Client-side task board state, synchronised against a [`RemoteTasks`] port.
///
/// One store serves one logged-in member, named at construction; optimistic
/// completion guesses attribute that member, exactly as the server will when
/// the call lands.
pub struct TaskStore<R: RemoteTasks> {
    remote: R,
    viewer: UserRef,
    tasks: Vec<TaskPayload>,
    loading: bool,
    last_error: Option<RemoteTasksError>,
    badge_tx: broadcast::Sender<Vec<String>>,
}

impl<R: RemoteTasks> TaskStore<R> {
    /// Build an empty store for `viewer`. Call [`TaskStore::load`] to fill it.
    pub fn new(remote: R, viewer: UserRef) -> Self {
        let (badge_tx, _) = broadcast::channel(BADGE_CHANNEL_CAPACITY);
        Self {
            remote,
            viewer,
            tasks: Vec::new(),
            loading: false,
            last_error: None,
            badge_tx,
        }
    }

    /// The member this store acts as.
    #[must_use]
    pub fn viewer(&self) -> &UserRef {
        &self.viewer
    }

    /// Current board contents, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[TaskPayload] {
        &self.tasks
    }

    /// Whether a full reload is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure recorded by the most recent settled call, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&RemoteTasksError> {
        self.last_error.as_ref()
    }

    /// Subscribe to badge announcements. Each mutation that earns badges
    /// produces exactly one message carrying the newly earned identifiers.
    #[must_use]
    pub fn subscribe_badges(&self) -> broadcast::Receiver<Vec<String>> {
        self.badge_tx.subscribe()
    }

    /// Tasks not yet done, in board order.
    #[must_use]
    pub fn pending(&self) -> Vec<&TaskPayload> {
        self.tasks.iter().filter(|task| !task.completed).collect()
    }

    /// Tasks in the done column, in board order.
    #[must_use]
    pub fn completed(&self) -> Vec<&TaskPayload> {
        self.tasks.iter().filter(|task| task.completed).collect()
    }

    /// Tasks rendered in one kanban column, in board order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Vec<&TaskPayload> {
        self.tasks
            .iter()
            .filter(|task| task.status == status)
            .collect()
    }

    /// Whether the viewer may move this task between columns. Mirrors the
    /// server's rule: the creator or the assignee may change status.
    #[must_use]
    pub fn can_move(&self, task: &TaskPayload) -> bool {
        task.user.id == self.viewer.id
            || task
                .assigned_to
                .as_ref()
                .is_some_and(|assignee| assignee.id == self.viewer.id)
    }

    /// Replace the board with the server's current state.
    ///
    /// On failure the board is cleared rather than left showing tasks of
    /// unknown staleness, and the error is recorded.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.remote.list().await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.last_error = None;
            }
            Err(error) => {
                self.tasks.clear();
                self.record_failure(error);
            }
        }
        self.loading = false;
    }

    /// Create a task and prepend it to the board.
    ///
    /// Creation is not optimistic: the server assigns the identifier and
    /// timestamps, so there is no sensible local guess to show first.
    pub async fn create(&mut self, body: CreateTaskBody) {
        match self.remote.create(body).await {
            Ok(mutation) => {
                self.tasks.insert(0, mutation.task.clone());
                self.settle(mutation);
            }
            Err(error) => self.record_failure(error),
        }
    }

    /// Rename a task. Applied optimistically; a failure reloads the board.
    pub async fn rename(&mut self, id: Uuid, title: impl Into<String>) {
        let title = title.into();
        if let Some(task) = self.task_mut(id) {
            task.title = title.clone();
        }
        let patch = UpdateTaskBody {
            title: Some(title),
            ..UpdateTaskBody::default()
        };
        self.settle_or_reload(id, patch).await;
    }

    /// Replace or clear a task's notes. Applied optimistically; a failure
    /// reloads the board.
    pub async fn edit_details(&mut self, id: Uuid, details: Option<String>) {
        if let Some(task) = self.task_mut(id) {
            task.details = details.clone();
        }
        let patch = UpdateTaskBody {
            details: Some(details),
            ..UpdateTaskBody::default()
        };
        self.settle_or_reload(id, patch).await;
    }

    /// Replace or clear a task's recurrence tag. Applied optimistically; a
    /// failure reloads the board.
    pub async fn set_recurring(&mut self, id: Uuid, recurring: Option<Recurrence>) {
        if let Some(task) = self.task_mut(id) {
            task.recurring = recurring.clone();
        }
        let patch = UpdateTaskBody {
            recurring: Some(recurring),
            ..UpdateTaskBody::default()
        };
        self.settle_or_reload(id, patch).await;
    }

    /// Replace or clear a task's due date. Applied optimistically; a failure
    /// reloads the board.
    pub async fn set_due_date(&mut self, id: Uuid, due_date: Option<DateTime<Utc>>) {
        if let Some(task) = self.task_mut(id) {
            task.due_date = due_date;
        }
        let patch = UpdateTaskBody {
            due_date: Some(due_date),
            ..UpdateTaskBody::default()
        };
        self.settle_or_reload(id, patch).await;
    }

    /// Reassign or unassign a task. Applied optimistically; a failure reloads
    /// the board.
    pub async fn assign(&mut self, id: Uuid, assignee: Option<UserRef>) {
        if let Some(task) = self.task_mut(id) {
            task.assigned_to = assignee.clone();
        }
        let patch = UpdateTaskBody {
            assigned_to_id: Some(assignee.map(|member| member.id)),
            ..UpdateTaskBody::default()
        };
        self.settle_or_reload(id, patch).await;
    }

    /// Move a task to another column.
    ///
    /// The completion side effect is guessed locally with the same transition
    /// rules the server applies: entering `done` attributes the viewer, and
    /// leaving it clears the attribution. A failure restores the task as it
    /// was before the guess.
    pub async fn set_status(&mut self, id: Uuid, status: TaskStatus) {
        let Some(prior) = self.task(id).cloned() else {
            return;
        };
        let viewer = self.viewer.clone();
        if let Some(task) = self.task_mut(id) {
            apply_status_locally(task, status, &viewer, Utc::now());
        }
        let patch = UpdateTaskBody {
            status: Some(status),
            ..UpdateTaskBody::default()
        };
        match self.remote.update(id, patch).await {
            Ok(mutation) => {
                self.replace_task(&mutation.task);
                self.settle(mutation);
            }
            Err(error) => {
                self.replace_task(&prior);
                self.record_failure(error);
            }
        }
    }

    /// Flip a task between `done` and `todo`.
    pub async fn toggle_complete(&mut self, id: Uuid) {
        let Some(task) = self.task(id) else {
            return;
        };
        let target = if task.completed {
            TaskStatus::Todo
        } else {
            TaskStatus::Done
        };
        self.set_status(id, target).await;
    }

    /// Delete a task. Removed optimistically; a failure puts the board back
    /// exactly as it was, order included.
    pub async fn delete(&mut self, id: Uuid) {
        let snapshot = self.tasks.clone();
        self.tasks.retain(|task| task.id != id);
        match self.remote.delete(id).await {
            Ok(_) => self.last_error = None,
            Err(error) => {
                self.tasks = snapshot;
                self.record_failure(error);
            }
        }
    }

    fn task(&self, id: Uuid) -> Option<&TaskPayload> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn task_mut(&mut self, id: Uuid) -> Option<&mut TaskPayload> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    fn replace_task(&mut self, truth: &TaskPayload) {
        if let Some(task) = self.task_mut(truth.id) {
            *task = truth.clone();
        }
    }

    /// Send the update and, on failure, discard every optimistic guess by
    /// reloading the board from the server.
    async fn settle_or_reload(&mut self, id: Uuid, patch: UpdateTaskBody) {
        match self.remote.update(id, patch).await {
            Ok(mutation) => {
                self.replace_task(&mutation.task);
                self.settle(mutation);
            }
            Err(error) => {
                self.load().await;
                self.record_failure(error);
            }
        }
    }

    fn settle(&mut self, mutation: TaskMutation) {
        self.last_error = None;
        if !mutation.earned_badges.is_empty() {
            debug!(badges = ?mutation.earned_badges, "badges earned");
            let _ = self.badge_tx.send(mutation.earned_badges);
        }
    }

    fn record_failure(&mut self, error: RemoteTasksError) {
        debug!(%error, "remote call failed");
        self.last_error = Some(error);
    }

    #[cfg(test)]
    pub(crate) fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }
}

/// Apply a status change to a local payload the way the server would,
/// attributing `viewer` when the task enters `done`.
fn apply_status_locally(
    task: &mut TaskPayload,
    status: TaskStatus,
    viewer: &UserRef,
    now: DateTime<Utc>,
) {
    match CompletionEffect::between(task.status, status) {
        CompletionEffect::Enter => {
            task.completed_by = Some(viewer.clone());
            task.completed_at = Some(now);
        }
        CompletionEffect::Leave => {
            task.completed_by = None;
            task.completed_at = None;
        }
        CompletionEffect::Unchanged => {}
    }
    task.status = status;
    task.completed = status.is_done();
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
