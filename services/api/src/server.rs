use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryQuoteRepository, LoggingAgentNotifier};
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use quote_desk::config::AppConfig;
use quote_desk::error::AppError;
use quote_desk::intake::QuoteRequestService;
use quote_desk::telemetry;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryQuoteRepository::default());
    let notifier = Arc::new(LoggingAgentNotifier);
    let quote_service = Arc::new(QuoteRequestService::new(
        repository,
        notifier,
        config.intake.clone(),
    ));

    let app = with_quote_routes(quote_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        reference_prefix = %config.intake.reference_prefix,
        "quote desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
