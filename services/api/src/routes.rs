use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use quote_desk::forms::{form_catalog, forms_router};
use quote_desk::intake::{intake_router, AgentNotifier, QuoteRequestRepository, QuoteRequestService};
use quote_desk::landing::{landing_pages, landing_router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct ServiceInfo {
    pub(crate) service: &'static str,
    pub(crate) version: &'static str,
    pub(crate) forms: usize,
    pub(crate) landing_pages: usize,
}

/// Full public surface: quote intake, form schemas, landing pages, and the
/// operational endpoints.
pub(crate) fn with_quote_routes<R, N>(service: Arc<QuoteRequestService<R, N>>) -> axum::Router
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    intake_router(service)
        .merge(forms_router())
        .merge(landing_router())
        .route("/", get(service_info))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        forms: form_catalog().len(),
        landing_pages: landing_pages().len(),
    })
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
