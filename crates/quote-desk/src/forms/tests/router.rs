use super::common::read_json_body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use crate::forms::forms_router;

#[tokio::test]
async fn lists_every_form_with_its_endpoint() {
    let response = forms_router()
        .oneshot(
            Request::get("/api/forms")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let forms = payload.as_array().expect("array of forms");
    assert_eq!(forms.len(), 7);
    assert!(forms.iter().any(|form| {
        form["key"] == "commercial-auto" && form["endpoint"] == "/api/commercial-auto-quotes"
    }));
}

#[tokio::test]
async fn serves_a_single_schema() {
    let response = forms_router()
        .oneshot(
            Request::get("/api/forms/quick-quote")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["key"], "quick-quote");
    assert_eq!(payload["endpoint"], "/api/quick-quotes");
    assert_eq!(payload["validation"], "schema");
    assert_eq!(payload["key_style"], "camel_case");
}

#[tokio::test]
async fn unknown_forms_are_not_found() {
    let response = forms_router()
        .oneshot(
            Request::get("/api/forms/yacht")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
