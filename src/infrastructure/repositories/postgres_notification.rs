use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::notification::{
    DeliveryChannel, Notification, NotificationRepository, NotificationStatus, RenderedContent,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const COLUMNS: &str = "id, recipient_id, template, title_ar, title_en, message_ar, message_en, priority, channels, status, scheduled_for, sent_at, read_at, action_url, metadata, created_at";

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    recipient_id: String,
    template: String,
    title_ar: String,
    title_en: String,
    message_ar: String,
    message_en: String,
    priority: String,
    channels: Vec<String>,
    status: String,
    scheduled_for: Option<DateTime<Utc>>,
    sent_at: Option<DateTime<Utc>>,
    read_at: Option<DateTime<Utc>>,
    action_url: Option<String>,
    metadata: Option<Value>,
    created_at: DateTime<Utc>,
}

// Stored enum names that fail to parse mean the row was written by something
// other than this service.
fn corrupt(err: DomainError) -> DomainError {
    DomainError::Persistence(format!("corrupt notification row: {err}"))
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let channels = row
            .channels
            .iter()
            .map(|c| c.parse::<DeliveryChannel>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(corrupt)?;

        Ok(Notification {
            id: row.id,
            recipient_id: row.recipient_id,
            template: row.template.parse().map_err(corrupt)?,
            content: RenderedContent {
                title_ar: row.title_ar,
                title_en: row.title_en,
                message_ar: row.message_ar,
                message_en: row.message_en,
            },
            priority: row.priority.parse().map_err(corrupt)?,
            channels,
            status: row.status.parse().map_err(corrupt)?,
            scheduled_for: row.scheduled_for,
            sent_at: row.sent_at,
            read_at: row.read_at,
            action_url: row.action_url,
            metadata: row.metadata,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn insert(&self, notification: Notification) -> DomainResult<Notification> {
        let channels: Vec<&str> = notification.channels.iter().map(|c| c.as_str()).collect();

        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "INSERT INTO notifications ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        ))
        .bind(notification.id)
        .bind(&notification.recipient_id)
        .bind(notification.template.as_str())
        .bind(&notification.content.title_ar)
        .bind(&notification.content.title_en)
        .bind(&notification.content.message_ar)
        .bind(&notification.content.message_en)
        .bind(notification.priority.as_str())
        .bind(channels)
        .bind(notification.status.as_str())
        .bind(notification.scheduled_for)
        .bind(notification.sent_at)
        .bind(notification.read_at)
        .bind(notification.action_url.as_deref())
        .bind(notification.metadata.as_ref())
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Notification::try_from(row)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Notification::try_from).transpose()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: NotificationStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE notifications SET status = $2, sent_at = COALESCE($3, sent_at) WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("notification not found".into()));
        }
        Ok(())
    }

    async fn mark_read(&self, id: Uuid, read_at: DateTime<Utc>) -> DomainResult<()> {
        sqlx::query("UPDATE notifications SET read_at = $2 WHERE id = $1 AND read_at IS NULL")
            .bind(id)
            .bind(read_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient_id: &str,
        unread_only: bool,
        limit: u32,
    ) -> DomainResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE recipient_id = $1 AND status <> 'PENDING' AND ($2 = FALSE OR read_at IS NULL)
             ORDER BY created_at DESC, id DESC
             LIMIT $3"
        ))
        .bind(recipient_id)
        .bind(unread_only)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn count_unread(&self, recipient_id: &str) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM notifications
             WHERE recipient_id = $1 AND status <> 'PENDING' AND read_at IS NULL",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map(|count| count as u64)
        .map_err(map_sqlx)
    }

    async fn claim_due(&self, now: DateTime<Utc>, limit: u32) -> DomainResult<Vec<Notification>> {
        // SKIP LOCKED keeps concurrent dispatchers (other instances included)
        // from claiming the same rows.
        let rows = sqlx::query_as::<_, NotificationRow>(&format!(
            "UPDATE notifications SET status = 'SENDING'
             WHERE id IN (
                 SELECT id FROM notifications
                 WHERE status = 'PENDING' AND scheduled_for IS NOT NULL AND scheduled_for <= $1
                 ORDER BY scheduled_for ASC
                 LIMIT $2
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING {COLUMNS}"
        ))
        .bind(now)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut claimed = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        claimed.sort_by_key(|n| n.scheduled_for);
        Ok(claimed)
    }
}
