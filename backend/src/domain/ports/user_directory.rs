//! Port for household member lookup and the dev-grade login check.

use async_trait::async_trait;

use crate::domain::{User, UserId};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// The directory could not be reached.
    #[error("user directory unavailable: {message}")]
    Unavailable {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl UserDirectoryError {
    /// Convenience constructor for [`UserDirectoryError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Login credentials checked against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Household login name.
    pub username: String,
    /// Shared-secret password; household trust model, not hardened auth.
    pub password: String,
}

/// Port resolving member identities and authenticating logins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a member by id.
    async fn find(&self, id: UserId) -> Result<Option<User>, UserDirectoryError>;

    /// All known members.
    async fn list(&self) -> Result<Vec<User>, UserDirectoryError>;

    /// Check credentials, returning the member on success.
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, UserDirectoryError>;
}
