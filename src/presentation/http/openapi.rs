// src/presentation/http/openapi.rs
use crate::presentation::http::openapi_types::{AuditLogListResponse, StatusResponse};
use axum::{Router, response::Redirect, routing::get};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::audit::list_audit_logs,
        crate::presentation::http::controllers::audit::list_audit_logs_by_actor,
        crate::presentation::http::controllers::audit::list_audit_logs_by_entity,
        crate::presentation::http::controllers::audit::verify_audit_chain,
        crate::presentation::http::controllers::notifications::list_templates,
        crate::presentation::http::controllers::notifications::create_notification,
        crate::presentation::http::controllers::notifications::list_notifications,
        crate::presentation::http::controllers::notifications::unread_count,
        crate::presentation::http::controllers::notifications::mark_notification_read,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            AuditLogListResponse,
            crate::presentation::http::error::ErrorBody,
            crate::presentation::http::controllers::notifications::CreateNotificationRequest,
            crate::application::dto::AuditLogDto,
            crate::application::dto::ChainVerificationDto,
            crate::application::dto::ChainBreakDto,
            crate::application::dto::NotificationDto,
            crate::application::dto::NotificationTemplateDto,
            crate::application::dto::UnreadCountDto
        )
    ),
    tags(
        (name = "Audit", description = "Tamper-evident audit trail"),
        (name = "Notifications", description = "Template notifications and inbox"),
        (name = "System", description = "System level endpoints")
    ),
    info(
        title = "LMS Core API",
        description = "Audit trail and notification service of the training platform",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Writes the OpenAPI document as pretty JSON to `OPENAPI_SNAPSHOT_PATH`
/// (default [`DEFAULT_SNAPSHOT_PATH`]) and returns the path written.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}
