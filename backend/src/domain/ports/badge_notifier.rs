//! Port announcing earned badges on the process-wide bus.

use crate::domain::UserId;

/// Announcement published when a household member earns badges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgesEarned {
    /// Who earned them.
    pub user: UserId,
    /// Non-empty list of badge identifiers.
    pub badges: Vec<String>,
}

/// Port publishing badge announcements.
///
/// The task subsystem is a producer only; listeners subscribe through the
/// adapter. Publishing must never fail the mutation that triggered it.
#[cfg_attr(test, mockall::automock)]
pub trait BadgeNotifier: Send + Sync {
    /// Publish one announcement.
    fn announce(&self, event: BadgesEarned);
}
