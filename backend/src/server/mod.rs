//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::time::Duration;

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use shareplate::Trace;
use shareplate::domain::ports::ListingRepository;
#[cfg(debug_assertions)]
use shareplate::doc::ApiDoc;
use shareplate::inbound::http::health::{HealthState, live, ready};
use shareplate::inbound::http::state::HttpState;
use shareplate::inbound::http::{configure, not_found};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(Cors::permissive())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.configure(configure).default_service(web::to(not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Without a document store the server is marked ready immediately; with one,
/// readiness is left to [`wait_for_store_ready`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let in_memory = config.store.is_none();
    let ServerConfig {
        bind_addr,
        store: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
    };
    let factory = move || build_app(deps.clone());

    #[cfg(feature = "metrics")]
    let server = match prometheus {
        Some(metrics) => HttpServer::new(move || factory().wrap(metrics.clone()))
            .bind(bind_addr)?
            .run(),
        None => HttpServer::new(factory).bind(bind_addr)?.run(),
    };
    #[cfg(not(feature = "metrics"))]
    let server = HttpServer::new(factory).bind(bind_addr)?.run();

    if in_memory {
        health_state.mark_ready();
    }
    Ok(server)
}

/// Ping the listing store until it answers, then mark the server ready.
///
/// Failed pings are logged and retried every `interval`.
pub async fn wait_for_store_ready<R>(
    repo: R,
    health_state: web::Data<HealthState>,
    interval: Duration,
) where
    R: ListingRepository,
{
    loop {
        match repo.ping().await {
            Ok(()) => {
                info!("listing store reachable");
                health_state.mark_ready();
                return;
            }
            Err(error) => {
                warn!(%error, retry_in = ?interval, "listing store ping failed");
                tokio::time::sleep(interval).await;
            }
        }
    }
}
