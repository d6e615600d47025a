//! Shared vocabulary for the household task board.
//!
//! Both sides of the synchronization protocol depend on this crate: the
//! backend serialises these payloads as ground truth, and the client store
//! applies the same status machine when guessing optimistically. Keeping the
//! types here guarantees the two sides can never disagree about the wire
//! contract or about what a transition does to the completion fields.

pub mod error;
pub mod recurrence;
pub mod status;
pub mod task;

pub use error::{ErrorBody, ErrorCode};
pub use recurrence::Recurrence;
pub use status::{CompletionEffect, TaskStatus, resolve_target_status};
pub use task::{CreateTaskBody, TaskDeleted, TaskMutation, TaskPayload, UpdateTaskBody, UserRef};
