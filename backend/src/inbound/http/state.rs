//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend
//! only on the domain ports and stay testable without real adapters.

use std::sync::Arc;

use crate::domain::ports::{TaskCommand, TaskQuery, UserDirectory};

/// Dependency bundle for the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Task mutations.
    pub commands: Arc<dyn TaskCommand>,
    /// Task reads.
    pub queries: Arc<dyn TaskQuery>,
    /// Member lookup and login.
    pub members: Arc<dyn UserDirectory>,
}
