use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use hireflow::clock::SystemClock;
use hireflow::config::AppConfig;
use hireflow::error::AppError;
use hireflow::telemetry;
use hireflow::workflows::{PageDefaults, WorkflowError};

use crate::cli::ServeArgs;
use crate::infra::{build_services, seed_users, AppState, Stores};
use crate::routes::api_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = Stores::default();
    seed_users(&stores.users).map_err(WorkflowError::from)?;
    let services = build_services(&stores, Arc::new(SystemClock));

    let page_defaults = PageDefaults {
        size: config.pagination.default_page_size,
    };
    let app = api_routes(services, page_defaults)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "recruitment workflow service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
