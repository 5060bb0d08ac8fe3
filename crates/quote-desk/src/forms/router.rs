use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::catalog::{form_catalog, form_schema};
use super::schema::{FormKey, QuoteEndpoint};

/// Catalog entry returned by `GET /api/forms`.
#[derive(Debug, Clone, Serialize)]
pub struct FormSummary {
    pub key: FormKey,
    pub title: String,
    pub endpoint: QuoteEndpoint,
    pub steps: usize,
}

/// Read-only schema endpoints for a schema-driven form renderer.
pub fn forms_router() -> Router {
    Router::new()
        .route("/api/forms", get(list_handler))
        .route("/api/forms/:form", get(schema_handler))
}

pub(crate) async fn list_handler() -> Json<Vec<FormSummary>> {
    let summaries = form_catalog()
        .into_iter()
        .map(|schema| FormSummary {
            key: schema.key,
            steps: schema.step_count(),
            title: schema.title,
            endpoint: schema.endpoint,
        })
        .collect();
    Json(summaries)
}

pub(crate) async fn schema_handler(Path(form): Path<String>) -> Response {
    match FormKey::from_slug(&form) {
        Some(key) => (StatusCode::OK, Json(form_schema(key))).into_response(),
        None => {
            let payload = json!({ "error": format!("unknown form '{form}'") });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
