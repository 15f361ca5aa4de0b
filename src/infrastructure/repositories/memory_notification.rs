use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::notification::{Notification, NotificationRepository, NotificationStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    rows: RwLock<HashMap<Uuid, Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(&self, notification: Notification) -> DomainResult<Notification> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&notification.id) {
            return Err(DomainError::Conflict("notification already exists".into()));
        }
        rows.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Notification>> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: NotificationStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound("notification not found".into()))?;
        row.status = status;
        if sent_at.is_some() {
            row.sent_at = sent_at;
        }
        Ok(())
    }

    async fn mark_read(&self, id: Uuid, read_at: DateTime<Utc>) -> DomainResult<()> {
        if let Some(row) = self.rows.write().await.get_mut(&id) {
            row.read_at.get_or_insert(read_at);
        }
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient_id: &str,
        unread_only: bool,
        limit: u32,
    ) -> DomainResult<Vec<Notification>> {
        let rows = self.rows.read().await;
        let mut items: Vec<Notification> = rows
            .values()
            .filter(|n| {
                n.recipient_id == recipient_id
                    && n.is_visible_to_recipient()
                    && (!unread_only || !n.is_read())
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn count_unread(&self, recipient_id: &str) -> DomainResult<u64> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|n| {
                n.recipient_id == recipient_id && n.is_visible_to_recipient() && !n.is_read()
            })
            .count() as u64)
    }

    async fn claim_due(&self, now: DateTime<Utc>, limit: u32) -> DomainResult<Vec<Notification>> {
        let mut rows = self.rows.write().await;
        let mut due: Vec<(Option<DateTime<Utc>>, Uuid)> = rows
            .values()
            .filter(|n| {
                n.status == NotificationStatus::Pending
                    && n.scheduled_for.is_some_and(|at| at <= now)
            })
            .map(|n| (n.scheduled_for, n.id))
            .collect();
        due.sort();
        due.truncate(limit as usize);

        let mut claimed = Vec::with_capacity(due.len());
        for (_, id) in due {
            if let Some(row) = rows.get_mut(&id) {
                row.status = NotificationStatus::Sending;
                claimed.push(row.clone());
            }
        }
        Ok(claimed)
    }
}
