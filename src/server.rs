use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::{Config, Role},
    emitter::LogEmitter,
    handlers::{self, collector::CollectorState, ChainState},
    metrics,
    signals::setup_signal_handlers,
    store::LogStore,
};

/// Start one tracelink service.
///
/// This function:
/// 1. Initializes metrics
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Creates the Axum application for the requested role
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(
    config: Config,
    role: Role,
    port: u16,
    config_path: PathBuf,
) -> Result<()> {
    let metrics_handle = Arc::new(metrics::init_metrics());

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    // Setup signal handlers (SIGTERM, SIGINT for shutdown; SIGHUP for reload)
    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = build_app(role, config_swap, metrics_handle);

    let addr = SocketAddr::from((config.server.host.parse::<std::net::IpAddr>()?, port));

    info!("Starting {} service on {}", role, addr);
    info!(
        "Environment: {:?}, collector endpoint: {}",
        config.environment,
        config.active_endpoints().collector
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router for one role, with health/metrics endpoints and
/// middleware shared by every role.
pub fn build_app(
    role: Role,
    config: Arc<ArcSwap<Config>>,
    metrics_handle: Arc<PrometheusHandle>,
) -> Router {
    let cfg = config.load_full();

    let service_router = if let Some(service) = role.service_name() {
        let http_client = reqwest::Client::new();
        let emitter = LogEmitter::spawn(
            service,
            cfg.active_endpoints().collector.clone(),
            http_client.clone(),
            cfg.collector.emitter_queue,
        );
        let state = ChainState {
            config: config.clone(),
            http_client,
            emitter,
        };

        match role {
            Role::Sender => Router::new()
                .route("/forward", post(handlers::sender::forward))
                .with_state(state),
            Role::Middleware => Router::new()
                .route("/process", post(handlers::middleware::process))
                .with_state(state),
            _ => Router::new()
                .route("/process", post(handlers::receiver::process))
                .with_state(state),
        }
    } else {
        let store = Arc::new(RwLock::new(LogStore::new(cfg.collector.capacity)));
        Router::new()
            .route("/log-ingest", post(handlers::collector::ingest))
            .route("/log-query", get(handlers::collector::query))
            .with_state(CollectorState { store })
    };

    Router::new()
        .route("/metrics", get(handlers::metrics_handler::metrics))
        .with_state(metrics_handle)
        .merge(service_router)
        .route(
            "/health",
            get(move || async move { Json(json!({ "status": "ok", "role": role.as_str() })) }),
        )
        // Limit request body size; these are small JSON payloads
        .layer(DefaultBodyLimit::max(1024 * 1024))
        // The demo UI pages call the services cross-origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
