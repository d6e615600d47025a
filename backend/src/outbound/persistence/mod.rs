//! In-process persistence adapters.
//!
//! The board runs against in-memory state; a relational adapter would slot
//! in behind the same ports.

mod memory_badges;
mod memory_tasks;
mod static_users;

pub use memory_badges::InMemoryBadgeLedger;
pub use memory_tasks::InMemoryTaskRepository;
pub use static_users::{SeededMember, StaticUserDirectory};
