//! Domain entities, ports, and services for the task board.
//!
//! Types here are transport agnostic. Inbound adapters map [`Error`] to HTTP
//! responses; outbound adapters implement the driven ports under
//! [`ports`].

pub mod badges;
pub mod error;
pub mod ports;
pub mod task;
pub mod task_service;
pub mod user;

pub use board_core::ErrorCode;
pub use error::Error;
pub use task::{Completion, Task, TaskDraft, TaskValidationError};
pub use task_service::TaskService;
pub use user::{DisplayName, User, UserId, UserValidationError};
