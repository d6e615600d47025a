//! Task board backend entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{ServerConfig, create_server, default_household};

#[derive(Debug, Parser)]
#[command(name = "boardd", about = "Household task board backend")]
struct Cli {
    /// Socket address to bind.
    #[arg(long, env = "BOARD_BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// File holding the session cookie signing key.
    #[arg(
        long,
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    session_key_file: PathBuf,

    /// Whether the session cookie requires HTTPS.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    cookie_secure: bool,

    /// Allow an ephemeral session key when the key file is unreadable.
    /// Sessions then die with the process; acceptable for development.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL", default_value_t = false)]
    allow_ephemeral_key: bool,

    /// Shared household password for the seeded accounts.
    #[arg(long, env = "BOARD_PASSWORD", default_value = "hygge")]
    household_password: String,
}

fn load_session_key(cli: &Cli) -> std::io::Result<Key> {
    match std::fs::read(&cli.session_key_file) {
        // Key::derive_from panics below 64 bytes, so check first.
        Ok(bytes) if bytes.len() >= 64 => Ok(Key::derive_from(&bytes)),
        Ok(bytes) => Err(std::io::Error::other(format!(
            "session key at {} is {} bytes; at least 64 required",
            cli.session_key_file.display(),
            bytes.len()
        ))),
        Err(error) => {
            if cfg!(debug_assertions) || cli.allow_ephemeral_key {
                warn!(
                    path = %cli.session_key_file.display(),
                    %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {error}",
                    cli.session_key_file.display()
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let cli = Cli::parse();
    let key = load_session_key(&cli)?;
    let members = default_household(&cli.household_password)
        .map_err(|error| std::io::Error::other(format!("invalid seeded member: {error}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, cli.cookie_secure, SameSite::Lax, cli.bind_addr);
    let server = create_server(health_state, config, members)?;
    server.await
}
