// src/application/commands/notifications/read.rs
use super::NotificationCommandService;
use crate::application::{
    dto::{Actor, NotificationDto},
    error::{ApplicationError, ApplicationResult},
};
use uuid::Uuid;

pub struct MarkNotificationReadCommand {
    pub notification_id: Uuid,
}

impl NotificationCommandService {
    /// Marks a notification as read. Only its recipient may do so; marking an
    /// already-read notification is a no-op.
    pub async fn mark_read(
        &self,
        actor: &Actor,
        command: MarkNotificationReadCommand,
    ) -> ApplicationResult<NotificationDto> {
        let mut notification = self
            .repo
            .find_by_id(command.notification_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("notification not found"))?;

        if notification.recipient_id != actor.id {
            return Err(ApplicationError::authorization(
                "notification belongs to another recipient",
            ));
        }

        if notification.read_at.is_none() {
            let now = self.clock.now();
            self.repo.mark_read(notification.id, now).await?;
            notification.read_at = Some(now);
        }

        Ok(notification.into())
    }
}
