use crate::application::{ApplicationResult, ports::delivery::NotificationSender};
use crate::domain::notification::{DeliveryChannel, Notification};
use async_trait::async_trait;

/// In-app notifications are read straight from the notifications table, so
/// storing the row is the delivery.
#[derive(Debug, Default, Clone)]
pub struct InAppSender;

#[async_trait]
impl NotificationSender for InAppSender {
    fn channel(&self) -> DeliveryChannel {
        DeliveryChannel::InApp
    }

    async fn send(&self, notification: &Notification) -> ApplicationResult<()> {
        tracing::debug!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            "in-app notification available"
        );
        Ok(())
    }
}
