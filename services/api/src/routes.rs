use crate::infra::{AppState, SharedDispatcher};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use mortgage_prequal::qualification::{resolve_tool_name, ErrorKind, ToolError, ToolResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct InvokeRequest {
    pub(crate) tool_name: String,
    #[serde(default)]
    pub(crate) arguments: Value,
}

/// Tool routes plus the operational endpoints. `AppState` is supplied as an extension layer.
pub(crate) fn with_tool_routes(dispatcher: SharedDispatcher) -> Router {
    tool_router(dispatcher)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) fn tool_router(dispatcher: SharedDispatcher) -> Router {
    Router::new()
        .route("/api/v1/tools", get(list_tools))
        .route("/api/v1/tools/:name", post(invoke_named_tool))
        .route("/api/v1/invoke", post(invoke_tool))
        .with_state(dispatcher)
}

pub(crate) async fn healthcheck() -> Json<Value> {
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

pub(crate) async fn list_tools(State(dispatcher): State<SharedDispatcher>) -> Json<Value> {
    Json(json!({ "tools": dispatcher.schemas() }))
}

/// Body is the arguments object itself. A request without a JSON body counts as no arguments;
/// a body that fails to parse is rejected on `arguments`.
pub(crate) async fn invoke_named_tool(
    State(dispatcher): State<SharedDispatcher>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let arguments = match body {
        Ok(Json(value)) => value,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(rejection) => {
            let error = ToolError::InvalidArgument {
                field: "arguments".to_string(),
                reason: rejection.body_text(),
            };
            warn!(operation = %name, error = %error, "tool request body rejected");
            return envelope_response(ToolResponse::error(resolve_tool_name(&name), &error));
        }
    };
    envelope_response(dispatcher.handle_value(&name, &arguments))
}

pub(crate) async fn invoke_tool(
    State(dispatcher): State<SharedDispatcher>,
    Json(request): Json<InvokeRequest>,
) -> impl IntoResponse {
    envelope_response(dispatcher.handle_value(&request.tool_name, &request.arguments))
}

fn envelope_response(response: ToolResponse) -> (StatusCode, Json<ToolResponse>) {
    (status_for(&response), Json(response))
}

pub(crate) fn status_for(response: &ToolResponse) -> StatusCode {
    match response.error_kind() {
        None => StatusCode::OK,
        Some(ErrorKind::UnknownOperation) => StatusCode::NOT_FOUND,
        Some(ErrorKind::InvalidArgument) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::DomainViolation) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use mortgage_prequal::qualification::ToolDispatcher;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        tool_router(Arc::new(ToolDispatcher::default()))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn lists_registered_tools() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/tools")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let names: Vec<&str> = payload["tools"]
            .as_array()
            .expect("tools array")
            .iter()
            .filter_map(|tool| tool["name"].as_str())
            .collect();
        assert!(names.contains(&"osfi_b20_stress_test"));
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn named_tool_route_returns_result() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/tools/calculate_down_payment",
                json!({ "purchase_price": 650000, "proposed_down_payment": 50000 }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], "OK");
        assert_eq!(payload["payload"]["minimum_required"], json!(40000.0));
        assert_eq!(payload["payload"]["insurance_required"], json!(true));
    }

    #[tokio::test]
    async fn invoke_route_resolves_gateway_names() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/invoke",
                json!({
                    "tool_name": "MortgageTools___check_credit_threshold",
                    "arguments": { "credit_score": 640, "down_payment_percentage": 25 },
                }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["operation"], "check_credit_threshold");
        assert_eq!(payload["payload"]["meets_threshold"], json!(false));
    }

    #[tokio::test]
    async fn error_kinds_map_to_status_codes() {
        let cases = [
            (
                "/api/v1/tools/calculate_foo",
                json!({}),
                StatusCode::NOT_FOUND,
            ),
            (
                "/api/v1/tools/check_credit_threshold",
                json!({ "credit_score": 950, "down_payment_percentage": 10 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                "/api/v1/tools/calculate_down_payment",
                json!({ "purchase_price": 500000, "proposed_down_payment": 600000 }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (uri, body, expected) in cases {
            let response = router()
                .oneshot(post_json(uri, body))
                .await
                .expect("route executes");
            assert_eq!(response.status(), expected, "{uri}");

            let payload = read_json_body(response).await;
            assert_eq!(payload["status"], "ERROR");
            assert!(payload["payload"]["message"].is_string());
        }
    }

    #[tokio::test]
    async fn named_tool_without_body_reports_missing_argument() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/tools/add_numbers")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert_eq!(payload["payload"]["kind"], "InvalidArgument");
        assert_eq!(payload["payload"]["field"], "a");
    }

    #[tokio::test]
    async fn named_tool_with_malformed_json_rejects_arguments() {
        let response = router()
            .oneshot(
                Request::post("/api/v1/tools/add_numbers")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"a\": 1,"))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert_eq!(payload["operation"], "add_numbers");
        assert_eq!(payload["status"], "ERROR");
        assert_eq!(payload["payload"]["kind"], "InvalidArgument");
        assert_eq!(payload["payload"]["field"], "arguments");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
