use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::QuoteRequestStatus;
use super::repository::{AgentNotifier, QuoteRequestRepository};
use super::service::{IntakeError, QuoteRequestService};
use crate::submission::QuoteReference;

/// Rows included in the agent CSV export.
pub const EXPORT_LIMIT: usize = 1_000;

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: QuoteRequestStatus,
}

/// Router exposing quote intake and the agent follow-up endpoints.
pub fn intake_router<R, N>(service: Arc<QuoteRequestService<R, N>>) -> Router
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    Router::new()
        .route("/api/:endpoint", post(submit_handler::<R, N>))
        .route("/api/quote-requests/export", get(export_handler::<R, N>))
        .route(
            "/api/quote-requests/:reference",
            get(status_handler::<R, N>),
        )
        .route(
            "/api/quote-requests/:reference/status",
            patch(update_status_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<QuoteRequestService<R, N>>>,
    Path(endpoint): Path<String>,
    Json(payload): Json<Value>,
) -> Response
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    match service.submit(&endpoint, payload) {
        Ok(record) => (StatusCode::CREATED, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<QuoteRequestService<R, N>>>,
    Path(reference): Path<String>,
) -> Response
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    match service.get(&QuoteReference(reference)) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_status_handler<R, N>(
    State(service): State<Arc<QuoteRequestService<R, N>>>,
    Path(reference): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    match service.update_status(&QuoteReference(reference), update.status) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<Arc<QuoteRequestService<R, N>>>,
) -> Response
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    match service.export(EXPORT_LIMIT) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref())],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: IntakeError) -> Response {
    let status = err.status_code();
    let payload = match err {
        IntakeError::Invalid { form, issues } => json!({
            "error": "quote request has fields needing attention",
            "form": form,
            "issues": issues,
        }),
        other => json!({ "error": other.to_string() }),
    };
    (status, Json(payload)).into_response()
}
