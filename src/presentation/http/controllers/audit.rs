// src/presentation/http/controllers/audit.rs
use crate::application::{
    dto::ChainVerificationDto,
    queries::audit::{ListAuditLogsByActorQuery, ListAuditLogsByEntityQuery, ListAuditLogsQuery},
};
use crate::presentation::http::error::{ErrorBody, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi_types::AuditLogListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAuditParams {
    /// Page size, 1-100 (default 20).
    #[serde(default)]
    pub limit: u32,
    /// Opaque cursor returned as `next_cursor` by the previous page.
    #[serde(default)]
    pub cursor: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    params(ListAuditParams, ("x-actor-id" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "Audit entries, newest first.", body = AuditLogListResponse),
        (status = 400, description = "Malformed cursor.", body = ErrorBody),
        (status = 401, description = "Missing caller identity.", body = ErrorBody)
    ),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(_actor): Authenticated,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<AuditLogListResponse>> {
    state
        .services
        .audit_queries
        .list_audit_logs(ListAuditLogsQuery {
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/actors/{actor_id}",
    params(
        ("actor_id" = String, Path, description = "Actor whose entries are listed"),
        ListAuditParams,
        ("x-actor-id" = String, Header, description = "Caller identity")
    ),
    responses(
        (status = 200, description = "Entries recorded for the actor.", body = AuditLogListResponse),
        (status = 401, description = "Missing caller identity.", body = ErrorBody)
    ),
    tag = "Audit"
)]
pub async fn list_audit_logs_by_actor(
    Extension(state): Extension<HttpState>,
    Authenticated(_actor): Authenticated,
    Path(actor_id): Path<String>,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<AuditLogListResponse>> {
    state
        .services
        .audit_queries
        .list_by_actor(ListAuditLogsByActorQuery {
            actor_id,
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/entities/{entity}/{entity_id}",
    params(
        ("entity" = String, Path, description = "Entity kind, e.g. `courses`"),
        ("entity_id" = String, Path, description = "Entity identifier"),
        ListAuditParams,
        ("x-actor-id" = String, Header, description = "Caller identity")
    ),
    responses(
        (status = 200, description = "Entries recorded for the entity.", body = AuditLogListResponse),
        (status = 401, description = "Missing caller identity.", body = ErrorBody)
    ),
    tag = "Audit"
)]
pub async fn list_audit_logs_by_entity(
    Extension(state): Extension<HttpState>,
    Authenticated(_actor): Authenticated,
    Path((entity, entity_id)): Path<(String, String)>,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<AuditLogListResponse>> {
    state
        .services
        .audit_queries
        .list_by_entity(ListAuditLogsByEntityQuery {
            entity,
            entity_id,
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs/verify",
    params(("x-actor-id" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "Result of re-hashing the whole chain.", body = ChainVerificationDto),
        (status = 401, description = "Missing caller identity.", body = ErrorBody)
    ),
    tag = "Audit"
)]
pub async fn verify_audit_chain(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<ChainVerificationDto>> {
    tracing::info!(actor_id = %actor.id, "audit chain verification requested");
    state
        .services
        .audit_queries
        .verify_chain()
        .await
        .into_http()
        .map(Json)
}
