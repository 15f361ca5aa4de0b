// src/domain/notification/repository.rs
use super::entity::{Notification, NotificationStatus};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn insert(&self, notification: Notification) -> DomainResult<Notification>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Notification>>;

    async fn set_status(
        &self,
        id: Uuid,
        status: NotificationStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> DomainResult<()>;

    /// Sets `read_at` unless it is already set.
    async fn mark_read(&self, id: Uuid, read_at: DateTime<Utc>) -> DomainResult<()>;

    /// Pending rows are excluded from the inbox and the unread count.
    async fn list_for_recipient(
        &self,
        recipient_id: &str,
        unread_only: bool,
        limit: u32,
    ) -> DomainResult<Vec<Notification>>;

    async fn count_unread(&self, recipient_id: &str) -> DomainResult<u64>;

    /// Atomically moves pending notifications whose schedule has passed to
    /// `SENDING` and returns them, oldest schedule first. A row is handed to
    /// at most one caller.
    async fn claim_due(&self, now: DateTime<Utc>, limit: u32) -> DomainResult<Vec<Notification>>;
}
