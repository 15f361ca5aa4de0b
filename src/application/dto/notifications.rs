use crate::domain::notification::{Notification, TemplateKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: Uuid,
    pub recipient_id: String,
    pub template: String,
    pub title_ar: String,
    pub title_en: String,
    pub message_ar: String,
    pub message_en: String,
    pub priority: String,
    pub channels: Vec<String>,
    pub status: String,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
    pub is_read: bool,
    pub action_url: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        let is_read = n.is_read();
        Self {
            id: n.id,
            recipient_id: n.recipient_id,
            template: n.template.as_str().to_string(),
            title_ar: n.content.title_ar,
            title_en: n.content.title_en,
            message_ar: n.content.message_ar,
            message_en: n.content.message_en,
            priority: n.priority.as_str().to_string(),
            channels: n.channels.iter().map(|c| c.as_str().to_string()).collect(),
            status: n.status.as_str().to_string(),
            scheduled_for: n.scheduled_for,
            sent_at: n.sent_at,
            read_at: n.read_at,
            is_read,
            action_url: n.action_url,
            metadata: n.metadata,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationTemplateDto {
    pub template: String,
    pub title_ar: String,
    pub title_en: String,
    pub message_ar: String,
    pub message_en: String,
}

impl From<TemplateKind> for NotificationTemplateDto {
    fn from(kind: TemplateKind) -> Self {
        let t = kind.template();
        Self {
            template: kind.as_str().to_string(),
            title_ar: t.title_ar.to_string(),
            title_en: t.title_en.to_string(),
            message_ar: t.message_ar.to_string(),
            message_en: t.message_en.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountDto {
    pub count: u64,
}
