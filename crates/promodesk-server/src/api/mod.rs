mod ai;
mod campaigns;
mod extract;
mod items;
mod metrics;
mod profile;
mod records;
mod settings;

use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use promodesk_core::{
    AffiliateLink, Brand, Campaign, ContentPiece, Earning, FieldErrors, PromotionalItem,
};
use promodesk_db::{DbError, DocumentStore, Repositories};
use promodesk_genai::{GenAiError, TextGenerator};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{
    enforce_rate_limit, request_id, require_bearer_auth, AuthState, RateLimitState, RequestId,
};

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub documents: Arc<dyn DocumentStore>,
    /// `None` when no generation backend is configured.
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// Present only when collections are backed by Postgres.
    pub pool: Option<PgPool>,
    pub page_size: usize,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    storage: &'static str,
    database: &'static str,
}

/// `page` and `page_size` query parameters shared by every list route.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PageQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
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
    pub(super) fn new(data: T, request_id: String) -> Self {
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
                field_errors: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    /// A 400 carrying every field-level error from one validation pass.
    pub fn validation(request_id: impl Into<String>, errors: FieldErrors) -> Self {
        let mut err = Self::new(request_id, "validation_error", errors.to_string());
        err.error.field_errors = Some(errors);
        err
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "generation_failed" => StatusCode::BAD_GATEWAY,
            "unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &DbError) -> ApiError {
    match error {
        DbError::NotFound { .. } => ApiError::new(request_id, "not_found", error.to_string()),
        DbError::Conflict { .. } => ApiError::new(request_id, "conflict", error.to_string()),
        DbError::Unavailable(_) => {
            tracing::warn!(error = %error, "storage backend unavailable");
            ApiError::new(request_id, "unavailable", error.to_string())
        }
        _ => {
            tracing::error!(error = %error, "storage operation failed");
            ApiError::new(request_id, "internal_error", "storage operation failed")
        }
    }
}

pub(super) fn map_genai_error(request_id: String, error: GenAiError) -> ApiError {
    match error {
        GenAiError::InvalidInput(errors) => ApiError::validation(request_id, errors),
        other => {
            tracing::warn!(error = %other, "generation failed");
            ApiError::new(request_id, "generation_failed", other.to_string())
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState, rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/brands",
            get(records::list::<Brand>).post(records::create::<Brand>),
        )
        .route(
            "/api/v1/brands/{id}",
            get(records::get::<Brand>)
                .put(records::update::<Brand>)
                .delete(records::delete::<Brand>),
        )
        .route(
            "/api/v1/items",
            get(records::list::<PromotionalItem>).post(records::create::<PromotionalItem>),
        )
        .route("/api/v1/items/categories", get(items::list_categories))
        .route(
            "/api/v1/items/{id}",
            get(records::get::<PromotionalItem>)
                .put(records::update::<PromotionalItem>)
                .delete(records::delete::<PromotionalItem>),
        )
        .route(
            "/api/v1/campaigns",
            get(records::list::<Campaign>).post(records::create::<Campaign>),
        )
        .route("/api/v1/campaigns/rows", get(campaigns::list_campaign_rows))
        .route(
            "/api/v1/campaigns/{id}",
            get(records::get::<Campaign>)
                .put(records::update::<Campaign>)
                .delete(records::delete::<Campaign>),
        )
        .route(
            "/api/v1/content",
            get(records::list::<ContentPiece>).post(records::create::<ContentPiece>),
        )
        .route(
            "/api/v1/content/{id}",
            get(records::get::<ContentPiece>)
                .put(records::update::<ContentPiece>)
                .delete(records::delete::<ContentPiece>),
        )
        .route(
            "/api/v1/links",
            get(records::list::<AffiliateLink>).post(records::create::<AffiliateLink>),
        )
        .route(
            "/api/v1/links/{id}",
            get(records::get::<AffiliateLink>)
                .put(records::update::<AffiliateLink>)
                .delete(records::delete::<AffiliateLink>),
        )
        .route(
            "/api/v1/earnings",
            get(records::list::<Earning>).post(records::create::<Earning>),
        )
        .route(
            "/api/v1/earnings/{id}",
            get(records::get::<Earning>)
                .put(records::update::<Earning>)
                .delete(records::delete::<Earning>),
        )
        .route(
            "/api/v1/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/v1/metrics/earnings", get(metrics::earnings))
        .route("/api/v1/metrics/links", get(metrics::links))
        .route("/api/v1/metrics/campaigns", get(metrics::campaigns))
        .route("/api/v1/metrics/overview", get(metrics::overview))
        .route(
            "/api/v1/ai/marketing-content",
            post(ai::generate_marketing_content),
        )
        .route(
            "/api/v1/ai/product-suggestions",
            post(ai::suggest_products),
        )
        .route(
            "/api/v1/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    rate_limit,
                    enforce_rate_limit,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    auth,
                    require_bearer_auth,
                )),
        )
}

pub fn build_app(state: AppState, auth: AuthState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth, rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    let Some(pool) = state.pool.as_ref() else {
        return (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    storage: "memory",
                    database: "not_configured",
                },
                meta,
            }),
        );
    };

    match promodesk_db::health_check(pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    storage: "postgres",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        storage: "postgres",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
