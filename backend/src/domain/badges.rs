//! Completion milestones for the badge layer.
//!
//! The task subsystem only produces badge awards; consuming them (profile
//! pages, toasts) happens elsewhere. Milestones are a fixed table so badge
//! identifiers stay stable across deployments.

/// Completion-count milestones and the badges they unlock.
pub const MILESTONES: [(u64, &str); 5] = [
    (1, "first-task-done"),
    (10, "ten-tasks-done"),
    (25, "twenty-five-tasks-done"),
    (50, "fifty-tasks-done"),
    (100, "hundred-tasks-done"),
];

/// Badges whose thresholds are met at `completed_total` lifetime completions.
///
/// The ledger adapter subtracts already-awarded badges, so awards stay
/// idempotent even when a task leaves `done` and comes back.
#[must_use]
pub fn badges_for_total(completed_total: u64) -> Vec<&'static str> {
    MILESTONES
        .iter()
        .filter(|(threshold, _)| completed_total >= *threshold)
        .map(|(_, badge)| *badge)
        .collect()
}
