//! Client-side synchronisation store for the household task board.
//!
//! [`store::TaskStore`] keeps a local task list in sync with the remote
//! store behind the [`remote::RemoteTasks`] port: mutations apply
//! optimistically, server responses replace the optimistic guess with
//! ground truth, and failures revert or reload so no stale optimistic
//! state survives a settled call.

pub mod http;
pub mod remote;
pub mod store;

pub use http::HttpRemoteTasks;
pub use remote::{RemoteTasks, RemoteTasksError};
pub use store::TaskStore;
