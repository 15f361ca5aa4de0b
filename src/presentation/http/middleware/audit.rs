// src/presentation/http/middleware/audit.rs
use crate::domain::audit::NewAuditEntry;
use crate::presentation::http::extractors::actor_from_parts;
use crate::presentation::http::state::HttpState;
use axum::{
    extract::{Extension, Request},
    http::Method,
    middleware::Next,
    response::Response,
};

/// Actor recorded for write requests that carried no (valid) identity.
const ANONYMOUS_ACTOR: &str = "anonymous";

/// Records every write-like request in the audit chain once the response is
/// ready. The append runs on a background task so the response never waits.
pub async fn audit_middleware(
    Extension(state): Extension<HttpState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    if !matches!(
        method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    ) {
        return next.run(req).await;
    }

    let path = req.uri().path().to_string();
    let (parts, body) = req.into_parts();
    let actor_id = match actor_from_parts(&parts) {
        Some(Ok(actor)) => actor.id,
        _ => ANONYMOUS_ACTOR.to_string(),
    };
    let ip = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let response = next.run(Request::from_parts(parts, body)).await;
    let status = response.status().as_u16();

    let mut entry = NewAuditEntry::new(
        actor_id,
        format!("{method} {path} -> {status}"),
        "http_request",
    );
    if let Some(ip) = ip {
        entry = entry.ip(ip);
    }

    let audit = std::sync::Arc::clone(&state.services.audit_commands);
    tokio::spawn(async move {
        audit.record(entry).await;
    });

    response
}
