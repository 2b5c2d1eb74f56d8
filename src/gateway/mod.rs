//! HTTP gateway (Axum) for scoring, claim verification and source checks.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use error::GatewayError;
pub use handler::{
    check_news_handler, score_handler, validate_article_url, verify_text_handler,
    verify_url_handler,
};
pub use payload::{ComponentStatus, HealthResponse, ReadyResponse};
pub use state::HandlerState;

use crate::constants::{
    CREDENCE_STATUS_HEADER, CREDENCE_STATUS_HEALTHY, CREDENCE_STATUS_NOT_READY,
    CREDENCE_STATUS_READY,
};

pub fn create_router_with_state(state: HandlerState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/score", post(score_handler))
        .route("/verify", get(verify_url_handler).post(verify_text_handler))
        .route("/check_news", get(check_news_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `*` (or an empty list) allows any origin; otherwise only the listed ones.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CREDENCE_STATUS_HEADER,
        HeaderValue::from_static(CREDENCE_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let dataset_status = if state.dataset.is_empty() {
        "empty"
    } else {
        CREDENCE_STATUS_READY
    };
    let search_status = if state.search_available {
        CREDENCE_STATUS_READY
    } else {
        "unconfigured"
    };

    let components = ComponentStatus {
        http: CREDENCE_STATUS_READY,
        dataset: dataset_status,
        dataset_entries: state.dataset.len(),
        search: search_status,
        model: state.model_name.clone(),
        cached_verdicts: state.verifier.cache().len(),
    };

    let is_ready =
        components.dataset == CREDENCE_STATUS_READY && components.search == CREDENCE_STATUS_READY;

    let (status_code, status_msg, header) = if is_ready {
        (StatusCode::OK, "ok", CREDENCE_STATUS_READY)
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "pending",
            CREDENCE_STATUS_NOT_READY,
        )
    };

    let mut headers = HeaderMap::new();
    headers.insert(CREDENCE_STATUS_HEADER, HeaderValue::from_static(header));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
