//! Static seeded user directory.
//!
//! Household membership is small and fixed, so the directory is a seeded
//! list checked in memory. Passwords are a shared household secret, not
//! hardened auth.

use async_trait::async_trait;

use crate::domain::ports::{Credentials, UserDirectory, UserDirectoryError};
use crate::domain::{User, UserId};

/// One seeded account: a member plus their login credentials.
#[derive(Debug, Clone)]
pub struct SeededMember {
    /// The member as tasks reference them.
    pub user: User,
    /// Login name, matched case-insensitively.
    pub username: String,
    /// Shared-secret password.
    pub password: String,
}

/// Directory over a fixed member list.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    members: Vec<SeededMember>,
}

impl StaticUserDirectory {
    /// Directory over the given accounts.
    #[must_use]
    pub fn new(members: Vec<SeededMember>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn find(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self
            .members
            .iter()
            .find(|member| member.user.id == id)
            .map(|member| member.user.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        Ok(self.members.iter().map(|member| member.user.clone()).collect())
    }

    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, UserDirectoryError> {
        Ok(self
            .members
            .iter()
            .find(|member| {
                member.username.eq_ignore_ascii_case(&credentials.username)
                    && member.password == credentials.password
            })
            .map(|member| member.user.clone()))
    }
}
