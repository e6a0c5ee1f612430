mod content;
mod influencer;

use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use vibeboard_core::AppConfig;
use vibeboard_db::{DbError, KvStore};
use vibeboard_profiler::ProfilerError;

use crate::middleware::{
    enforce_rate_limit, request_id, RateLimitState, RequestId, REQUEST_ID_HEADER,
};
use crate::population::HandleLocks;

const CORS_MAX_AGE: Duration = Duration::from_secs(600);

/// Simulated latencies for the mock scrape and content analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub scrape_delay: Duration,
    pub analysis_delay: Duration,
}

impl Settings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            scrape_delay: Duration::from_millis(config.scrape_delay_ms),
            analysis_delay: Duration::from_millis(config.analysis_delay_ms),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: KvStore,
    pub settings: Settings,
    pub population_locks: HandleLocks,
}

impl AppState {
    #[must_use]
    pub fn new(store: KvStore, settings: Settings) -> Self {
        Self {
            store,
            settings,
            population_locks: HandleLocks::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    store: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &DbError) -> ApiError {
    match error {
        DbError::NotFound(key) => {
            tracing::debug!(key = %key, "cache miss");
            ApiError::new(request_id, "not_found", "influencer data not found")
        }
        other => {
            tracing::error!(error = %other, "store operation failed");
            ApiError::new(request_id, "internal_error", "store operation failed")
        }
    }
}

pub(super) fn map_profiler_error(request_id: String, error: &ProfilerError) -> ApiError {
    match error {
        ProfilerError::InvalidInput(message) => {
            ApiError::new(request_id, "validation_error", message.clone())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(CORS_MAX_AGE)
}

fn influencer_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/influencer/{handle}",
            get(influencer::get_influencer),
        )
        .route(
            "/api/v1/influencer/{handle}/scrape",
            post(influencer::scrape_influencer),
        )
        .route(
            "/api/v1/influencer/{handle}/scrape-status",
            get(influencer::get_scrape_status),
        )
        .route(
            "/api/v1/influencer/{handle}/analytics",
            get(influencer::get_analytics),
        )
        .route(
            "/api/v1/influencer/{handle}/analyze-content",
            post(content::analyze_content),
        )
        .route("/api/v1/influencer/{handle}/posts", get(content::list_posts))
        .route("/api/v1/influencer/{handle}/reels", get(content::list_reels))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(influencer_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(
                    |request: &axum::http::Request<_>| {
                        tracing::debug_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                        )
                    },
                ))
                .layer(build_cors())
                .layer(CompressionLayer::new())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let store = state.store.backend().to_string();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::new(
                req_id.0,
                HealthData {
                    status: "ok",
                    store,
                },
            )),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::new(
                    req_id.0,
                    HealthData {
                        status: "degraded",
                        store,
                    },
                )),
            )
        }
    }
}
