use crate::application::{ApplicationResult, ports::delivery::NotificationSender};
use crate::domain::notification::{DeliveryChannel, Notification};
use async_trait::async_trait;

#[derive(Debug, Default, Clone)]
pub struct LoggingSmsSender;

#[async_trait]
impl NotificationSender for LoggingSmsSender {
    fn channel(&self) -> DeliveryChannel {
        DeliveryChannel::Sms
    }

    async fn send(&self, notification: &Notification) -> ApplicationResult<()> {
        tracing::info!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            chars = notification.content.message_en.chars().count(),
            "sms notification queued"
        );
        Ok(())
    }
}
