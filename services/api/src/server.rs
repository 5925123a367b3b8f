use crate::cli::ServeArgs;
use crate::infra::{build_lookup, AppState};
use crate::routes::api_router;
use axum_prometheus::PrometheusMetricLayer;
use deal_analyst::config::AppConfig;
use deal_analyst::error::AppError;
use deal_analyst::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // The blocking HTTP client owns its own runtime; build it off the async workers.
    let lookup_config = config.clone();
    let lookup = tokio::task::spawn_blocking(move || build_lookup(&lookup_config))
        .await
        .map_err(|err| AppError::Task(err.to_string()))??;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        lookup: Arc::new(lookup),
    };

    let app = api_router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "deal analyst service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
