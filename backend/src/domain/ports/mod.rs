//! Ports connecting the domain to adapters.
//!
//! Driving ports ([`TaskCommand`], [`TaskQuery`]) are implemented by
//! services and consumed by inbound adapters. Driven ports
//! ([`TaskRepository`], [`UserDirectory`], [`BadgeLedger`],
//! [`BadgeNotifier`]) are implemented by outbound adapters.

mod badge_ledger;
mod badge_notifier;
mod task_ops;
mod task_repository;
mod user_directory;

pub use badge_ledger::{BadgeLedger, BadgeLedgerError};
pub use badge_notifier::{BadgeNotifier, BadgesEarned};
pub use task_ops::{
    CreateTaskRequest, DeleteTaskRequest, TaskCommand, TaskQuery, UpdateTaskRequest,
};
pub use task_repository::{TaskRepository, TaskRepositoryError};
pub use user_directory::{Credentials, UserDirectory, UserDirectoryError};

#[cfg(test)]
pub use badge_ledger::MockBadgeLedger;
#[cfg(test)]
pub use badge_notifier::MockBadgeNotifier;
#[cfg(test)]
pub use task_repository::MockTaskRepository;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
