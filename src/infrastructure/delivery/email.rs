use crate::application::{ApplicationResult, ports::delivery::NotificationSender};
use crate::domain::notification::{DeliveryChannel, Notification};
use async_trait::async_trait;

/// Stand-in for an SMTP integration: logs what would be sent.
#[derive(Debug, Default, Clone)]
pub struct LoggingEmailSender;

#[async_trait]
impl NotificationSender for LoggingEmailSender {
    fn channel(&self) -> DeliveryChannel {
        DeliveryChannel::Email
    }

    async fn send(&self, notification: &Notification) -> ApplicationResult<()> {
        tracing::info!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            subject = %notification.content.title_en,
            "email notification queued"
        );
        Ok(())
    }
}
