//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::{DisplayName, TaskService, User, UserId};
use crate::inbound::http::state::HttpState;
use crate::outbound::notify::BroadcastBadgeNotifier;
use crate::outbound::persistence::{
    InMemoryBadgeLedger, InMemoryTaskRepository, SeededMember, StaticUserDirectory,
};

/// Session middleware configured for tests: fresh key per invocation,
/// cookie named `session`, `Secure` disabled for plain-HTTP test calls.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

fn seeded_member(name: &str, username: &str) -> SeededMember {
    SeededMember {
        user: User::new(
            UserId::random(),
            DisplayName::new(name).expect("valid name"),
        ),
        username: username.to_owned(),
        password: "hygge".to_owned(),
    }
}

/// Handler state over fresh in-memory adapters, seeded with two members
/// ("maja" and "teo", password "hygge").
pub fn seeded_http_state() -> HttpState {
    let directory = Arc::new(StaticUserDirectory::new(vec![
        seeded_member("Maja", "maja"),
        seeded_member("Teo", "teo"),
    ]));
    let service = Arc::new(TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&directory),
        Arc::new(InMemoryBadgeLedger::new()),
        Arc::new(BroadcastBadgeNotifier::new()),
    ));
    HttpState {
        commands: Arc::clone(&service) as _,
        queries: service,
        members: directory,
    }
}
