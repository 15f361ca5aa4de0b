// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, notifications},
    middleware::{audit::audit_middleware, rate_limit::rate_limit_layer},
    openapi,
    openapi_types::StatusResponse,
};
use axum::{
    Extension, Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Exact origins allowed by CORS. Empty allows any origin.
    pub allowed_origins: Vec<String>,
    pub rate_limit: bool,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(crate::presentation::http::extractors::ACTOR_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, options: RouterOptions) -> Router {
    let api = Router::new()
        .route("/api/v1/audit-logs", get(audit::list_audit_logs))
        .route("/api/v1/audit-logs/verify", get(audit::verify_audit_chain))
        .route(
            "/api/v1/audit-logs/actors/{actor_id}",
            get(audit::list_audit_logs_by_actor),
        )
        .route(
            "/api/v1/audit-logs/entities/{entity}/{entity_id}",
            get(audit::list_audit_logs_by_entity),
        )
        .route(
            "/api/v1/notification-templates",
            get(notifications::list_templates),
        )
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/api/v1/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/api/v1/notifications/{id}/read",
            post(notifications::mark_notification_read),
        )
        .layer(middleware::from_fn(audit_middleware));

    let mut router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(api);

    if options.rate_limit {
        if let Some(limiter) = rate_limit_layer() {
            router = router.layer(limiter);
        }
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
