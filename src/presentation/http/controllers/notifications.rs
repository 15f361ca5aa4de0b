// src/presentation/http/controllers/notifications.rs
use crate::application::{
    commands::notifications::{
        CreateNotificationCommand, MarkNotificationReadCommand, NotificationOptions,
    },
    dto::{NotificationDto, NotificationTemplateDto, UnreadCountDto},
    error::{ApplicationError, ApplicationResult},
    queries::notifications::ListNotificationsQuery,
};
use crate::domain::notification::{DeliveryChannel, NotificationPriority, TemplateKind};
use crate::presentation::http::error::{ErrorBody, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNotificationRequest {
    /// Template name, e.g. `CERTIFICATE_ISSUED`.
    pub template: String,
    pub recipient_id: String,
    /// Values substituted for `{name}` placeholders.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// `LOW`, `MEDIUM`, `HIGH` or `URGENT`.
    pub priority: Option<String>,
    /// Any of `IN_APP`, `EMAIL`, `SMS`. Defaults to `IN_APP`.
    pub channels: Option<Vec<String>>,
    /// Deliver later instead of immediately.
    pub scheduled_for: Option<DateTime<Utc>>,
    pub action_url: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

impl CreateNotificationRequest {
    fn into_command(self) -> ApplicationResult<CreateNotificationCommand> {
        let template: TemplateKind = self.template.parse()?;
        let priority = self
            .priority
            .map(|p| p.parse::<NotificationPriority>())
            .transpose()?;
        let channels = self
            .channels
            .map(|list| {
                list.iter()
                    .map(|c| c.parse::<DeliveryChannel>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(CreateNotificationCommand {
            template,
            recipient_id: self.recipient_id,
            variables: self.variables,
            options: NotificationOptions {
                priority,
                channels,
                scheduled_for: self.scheduled_for,
                action_url: self.action_url,
                metadata: self.metadata,
            },
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotificationsParams {
    #[serde(default)]
    pub unread_only: bool,
    /// Page size, 1-200 (default 50).
    #[serde(default)]
    pub limit: u32,
}

#[utoipa::path(
    get,
    path = "/api/v1/notification-templates",
    responses(
        (status = 200, description = "Registered notification templates.", body = [NotificationTemplateDto])
    ),
    tag = "Notifications"
)]
pub async fn list_templates(
    Extension(state): Extension<HttpState>,
) -> Json<Vec<NotificationTemplateDto>> {
    Json(state.services.notification_queries.list_templates())
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    request_body = CreateNotificationRequest,
    params(("x-actor-id" = String, Header, description = "Caller identity")),
    responses(
        (status = 201, description = "Notification stored and, unless scheduled, delivered.", body = NotificationDto),
        (status = 400, description = "Unknown template, priority or channel.", body = ErrorBody),
        (status = 401, description = "Missing caller identity.", body = ErrorBody),
        (status = 502, description = "A delivery channel failed.", body = ErrorBody)
    ),
    tag = "Notifications"
)]
pub async fn create_notification(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Json(payload): Json<CreateNotificationRequest>,
) -> HttpResult<(StatusCode, Json<NotificationDto>)> {
    let command = payload.into_command().into_http()?;
    state
        .services
        .notification_commands
        .create_from_template(&actor, command)
        .await
        .into_http()
        .map(|dto| (StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    params(ListNotificationsParams, ("x-actor-id" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "The caller's notifications, newest first.", body = [NotificationDto]),
        (status = 401, description = "Missing caller identity.", body = ErrorBody)
    ),
    tag = "Notifications"
)]
pub async fn list_notifications(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<ListNotificationsParams>,
) -> HttpResult<Json<Vec<NotificationDto>>> {
    state
        .services
        .notification_queries
        .list_for_recipient(
            &actor,
            ListNotificationsQuery {
                unread_only: params.unread_only,
                limit: params.limit,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    params(("x-actor-id" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "Number of unread notifications.", body = UnreadCountDto),
        (status = 401, description = "Missing caller identity.", body = ErrorBody)
    ),
    tag = "Notifications"
)]
pub async fn unread_count(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<UnreadCountDto>> {
    state
        .services
        .notification_queries
        .unread_count(&actor)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification id"),
        ("x-actor-id" = String, Header, description = "Caller identity")
    ),
    responses(
        (status = 200, description = "Notification marked as read.", body = NotificationDto),
        (status = 403, description = "Notification belongs to someone else.", body = ErrorBody),
        (status = 404, description = "No such notification.", body = ErrorBody)
    ),
    tag = "Notifications"
)]
pub async fn mark_notification_read(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<NotificationDto>> {
    let notification_id = Uuid::parse_str(&id)
        .map_err(|_| ApplicationError::validation("notification id must be a UUID"))
        .into_http()?;
    state
        .services
        .notification_commands
        .mark_read(&actor, MarkNotificationReadCommand { notification_id })
        .await
        .into_http()
        .map(Json)
}
