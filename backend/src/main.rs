//! Server entry-point: loads settings, wires adapters and serves the REST API.

mod server;

use std::env;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use sharefood::domain::MessageCatalog;
use sharefood::inbound::http::health::HealthState;
use sharefood::outbound::catalog::load_message_catalog;
use sharefood::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use sharefood::outbound::security::{Argon2PasswordHasher, JwtTokens};

use server::{AppSettings, Credentials, ServerConfig, build_http_state, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect(settings: &AppSettings) -> Result<Option<DbPool>> {
    let Some(database_url) = settings.database_url.as_deref() else {
        warn!("no database configured; serving fixture data");
        return Ok(None);
    };
    if settings.run_migrations {
        run_pending_migrations(database_url)
            .await
            .wrap_err("applying migrations")?;
    }
    let config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(config)
        .await
        .wrap_err("building the database pool")?;
    Ok(Some(pool))
}

fn credentials(settings: &AppSettings) -> Result<Credentials> {
    let tokens = Arc::new(JwtTokens::new(settings.jwt_secret()?, settings.token_ttl()));
    Ok(Credentials {
        hasher: Arc::new(Argon2PasswordHasher::default()),
        issuer: tokens.clone(),
        verifier: tokens,
    })
}

fn catalog(settings: &AppSettings) -> Result<Arc<MessageCatalog>> {
    let catalog = load_message_catalog(
        settings.message_catalog_path.as_deref(),
        settings.default_language(),
    )
    .wrap_err("loading the message catalog")?;
    Ok(Arc::new(catalog))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load_from_iter(env::args_os()).wrap_err("loading settings")?;
    let config = ServerConfig {
        bind_addr: settings.bind_addr()?,
        client_request_timeout: settings.client_request_timeout(),
    };
    let pool = connect(&settings).await?;
    let http_state = build_http_state(pool.as_ref(), credentials(&settings)?, catalog(&settings)?);

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr, "starting server");
    let server = create_server(health_state.clone(), http_state, config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated")
}
