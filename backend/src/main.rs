//! Complaint tracker entry-point: loads settings, prepares storage and the
//! signing key, then serves the REST API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use complaints::inbound::http::health::HealthState;
use complaints::inbound::http::token_config::{
    BuildMode, fingerprint::key_fingerprint, token_settings_from_env,
};
use complaints::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{Persistence, ServerConfig, ServerSettings, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let admin = settings.admin_account().map_err(std::io::Error::other)?;

    let tokens = token_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&tokens.key),
        ephemeral = tokens.ephemeral,
        ttl_minutes = tokens.ttl.num_minutes(),
        "token signing key loaded"
    );

    let persistence = match settings.database_url.as_deref() {
        Some(url) => {
            let applied = run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "database migrations complete");
            let pool = DbPool::new(&PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            Persistence::Postgres(pool)
        }
        None => Persistence::InMemory,
    };

    let http_state = build_http_state(&persistence, tokens, admin.as_ref()).await?;

    #[cfg(feature = "metrics")]
    let prometheus = PrometheusMetricsBuilder::new("complaints")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig {
            bind_addr,
            http_state,
            #[cfg(feature = "metrics")]
            prometheus,
        },
    )?;
    info!(%bind_addr, "listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    info!("server stopped");
    outcome
}
