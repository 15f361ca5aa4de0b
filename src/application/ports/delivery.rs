// src/application/ports/delivery.rs
use crate::application::ApplicationResult;
use crate::domain::notification::{DeliveryChannel, Notification};
use async_trait::async_trait;

/// Delivers a stored notification over one channel.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    fn channel(&self) -> DeliveryChannel;

    async fn send(&self, notification: &Notification) -> ApplicationResult<()>;
}
