//! HTTP inbound adapter exposing the board's REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod session;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
