//! Port for completion accounting and idempotent badge awards.

use async_trait::async_trait;

use crate::domain::UserId;

/// Errors raised by badge ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadgeLedgerError {
    /// The ledger could not be reached.
    #[error("badge ledger unavailable: {message}")]
    Unavailable {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl BadgeLedgerError {
    /// Convenience constructor for [`BadgeLedgerError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port tracking per-member completion tallies and awarded badges.
///
/// Awards are idempotent: once a badge has been granted it is never returned
/// again, even if the tally later dips below the threshold and recovers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeLedger: Send + Sync {
    /// Record one completion by `user`; returns badges newly earned by it.
    async fn record_completion(&self, user: UserId) -> Result<Vec<String>, BadgeLedgerError>;

    /// Record that a completion was undone (the task left `done`).
    async fn record_uncompletion(&self, user: UserId) -> Result<(), BadgeLedgerError>;
}
