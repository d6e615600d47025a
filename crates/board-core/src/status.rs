//! Task status vocabulary and the completion side-effect machine.

use serde::{Deserialize, Serialize};

/// Kanban column a task renders in.
///
/// The set is closed at the type level. Unrecognised strings supplied by an
/// open client coerce to [`TaskStatus::Todo`] at the serde boundary, so board
/// rendering never encounters an unknown column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Picked up but not finished.
    InProgress,
    /// Finished; carries completion attribution.
    Done,
}

impl TaskStatus {
    /// Column order the board renders in.
    pub const COLUMNS: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Total parse: unrecognised input maps to [`TaskStatus::Todo`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "in_progress" => Self::InProgress,
            "done" => Self::Done,
            _ => Self::Todo,
        }
    }

    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Whether this status carries completion attribution.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effect a status transition has on the completion fields.
///
/// Shared by the client's optimistic guess and the server's authoritative
/// application, so both compute the same answer for the same transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionEffect {
    /// The task enters `done`: stamp `completedBy`/`completedAt`.
    Enter,
    /// The task leaves `done`: clear the attribution fields.
    Leave,
    /// Completion fields are untouched. Re-entering `done` lands here, so a
    /// no-op transition never reassigns attribution.
    Unchanged,
}

impl CompletionEffect {
    /// Effect of moving a task from `from` to `to`.
    #[must_use]
    pub const fn between(from: TaskStatus, to: TaskStatus) -> Self {
        match (from.is_done(), to.is_done()) {
            (false, true) => Self::Enter,
            (true, false) => Self::Leave,
            _ => Self::Unchanged,
        }
    }
}

/// Resolve the target status of an update that may carry the legacy
/// `completed` boolean alongside, or instead of, an explicit status.
///
/// An explicit status always wins. Otherwise `completed = true` means `done`
/// and `completed = false` means `todo`. An update touching neither keeps the
/// current status.
#[must_use]
pub const fn resolve_target_status(
    current: TaskStatus,
    requested: Option<TaskStatus>,
    completed: Option<bool>,
) -> TaskStatus {
    match (requested, completed) {
        (Some(status), _) => status,
        (None, Some(true)) => TaskStatus::Done,
        (None, Some(false)) => TaskStatus::Todo,
        (None, None) => current,
    }
}
