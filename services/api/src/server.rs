use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_tool_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mortgage_prequal::config::AppConfig;
use mortgage_prequal::error::AppError;
use mortgage_prequal::qualification::ToolDispatcher;
use mortgage_prequal::telemetry;
use std::sync::atomic::Ordering;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let rules = Arc::new(config.qualification);
    let dispatcher = Arc::new(ToolDispatcher::with_shared_config(rules));
    let tool_count = dispatcher.operations().len();

    let app = with_tool_routes(dispatcher.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        tools = tool_count,
        gds_limit = dispatcher.config().gds_limit,
        tds_limit = dispatcher.config().tds_limit,
        rate_floor = dispatcher.config().qualifying_rate_floor,
        "mortgage pre-qualification service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
