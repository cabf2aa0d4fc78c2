//! Gateway entry-point: loads settings, wires the listing store and serves
//! the REST endpoints. The store client is built lazily, so an unreachable
//! store leaves the server up and unready rather than aborting startup.

mod server;

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server, wait_for_store_ready};
use shareplate::inbound::http::health::HealthState;
use shareplate::outbound::persistence::{MongoListingRepository, MongoStore};
use shareplate::settings::ServerSettings;

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

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?
        .with_env_fallbacks();
    let bind_addr = resolve_bind_addr(settings.bind_addr())?;

    let store = settings.store_config().map(MongoStore::new);
    if store.is_none() {
        warn!("no document store configured; listings are kept in memory");
    }

    let mut config = ServerConfig::new(bind_addr);
    if let Some(store) = store.clone() {
        config = config.with_store(store);
    }
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("shareplate")
            .endpoint("/metrics")
            .build()
    }));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    if let Some(store) = store {
        actix_web::rt::spawn(wait_for_store_ready(
            MongoListingRepository::new(store),
            health_state,
            Duration::from_secs(settings.connect_timeout_secs),
        ));
    }

    info!(%bind_addr, "listening");
    server.await
}

fn resolve_bind_addr(addr: (String, u16)) -> std::io::Result<SocketAddr> {
    addr.to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            format!("bind address {}:{} did not resolve", addr.0, addr.1),
        )
    })
}

/// Build Prometheus middleware, logging and returning `None` on failure.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            warn!(error = %e, "Prometheus metrics disabled");
            None
        }
    }
}
