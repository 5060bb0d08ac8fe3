use axum::{
    extract::Path,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::catalog::{find_landing_page, landing_pages};
use super::domain::LandingSummary;
use super::render::render_landing_html;
use crate::forms::form_schema;

pub fn landing_router() -> Router {
    Router::new()
        .route("/api/landing-pages", get(list_handler))
        .route("/api/landing-pages/:slug", get(page_handler))
        .route("/landing/:slug", get(html_handler))
}

pub(crate) async fn list_handler() -> Json<Vec<LandingSummary>> {
    Json(landing_pages().iter().map(LandingSummary::from).collect())
}

pub(crate) async fn page_handler(Path(slug): Path<String>) -> Response {
    match find_landing_page(&slug) {
        Some(page) => (StatusCode::OK, Json(page)).into_response(),
        None => not_found(&slug),
    }
}

pub(crate) async fn html_handler(Path(slug): Path<String>) -> Response {
    match find_landing_page(&slug) {
        Some(page) => {
            let form = form_schema(page.form);
            Html(render_landing_html(page, &form)).into_response()
        }
        None => not_found(&slug),
    }
}

fn not_found(slug: &str) -> Response {
    let payload = json!({ "error": format!("unknown landing page '{slug}'") });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}
