//! Server construction and middleware wiring.

mod config;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
pub use config::ServerConfig;

use crate::domain::{DisplayName, TaskService, User, UserId, UserValidationError};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tasks::{create_task, delete_task, list_tasks, update_task};
use crate::inbound::http::users::{list_users, login};
use crate::middleware::trace::Trace;
use crate::outbound::notify::BroadcastBadgeNotifier;
use crate::outbound::persistence::{
    InMemoryBadgeLedger, InMemoryTaskRepository, SeededMember, StaticUserDirectory,
};

fn seeded(name: &str, username: &str, password: &str) -> Result<SeededMember, UserValidationError> {
    Ok(SeededMember {
        user: User::new(UserId::random(), DisplayName::new(name)?),
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

/// The default household accounts, sharing one password.
///
/// Membership is fixed per deployment; identifiers are minted at startup and
/// discovered by clients through `GET /users`.
pub fn default_household(password: &str) -> Result<Vec<SeededMember>, UserValidationError> {
    Ok(vec![
        seeded("Maja", "maja", password)?,
        seeded("Teo", "teo", password)?,
        seeded("Nana", "nana", password)?,
    ])
}

/// Wire the in-memory adapters and the task service into handler state.
#[must_use]
pub fn build_http_state(members: Vec<SeededMember>) -> HttpState {
    let directory = Arc::new(StaticUserDirectory::new(members));
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

/// Everything [`build_app`] needs; cloneable so the server factory can
/// rebuild the app per worker.
#[derive(Clone)]
pub struct AppDependencies {
    /// Shared probe state.
    pub health_state: web::Data<HealthState>,
    /// Handler state over the wired adapters.
    pub http_state: web::Data<HttpState>,
    /// Session cookie signing key.
    pub key: Key,
    /// Whether the session cookie requires HTTPS.
    pub cookie_secure: bool,
    /// SameSite policy for the session cookie.
    pub same_site: SameSite,
}

/// Assemble the application: trace middleware, session-wrapped API scope,
/// and the health probes.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(list_users)
        .service(list_tasks)
        .service(create_task)
        .service(update_task)
        .service(delete_task);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server from the configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    members: Vec<SeededMember>,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(members));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
