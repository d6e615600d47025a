//! Remote store for the shared household task board.
//!
//! The crate follows a ports-and-adapters layout: `domain` holds the task
//! aggregate, driving/driven ports, and the services behind them; `inbound`
//! adapts HTTP; `outbound` provides the in-process adapters. `server` wires
//! everything into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::trace::Trace;
