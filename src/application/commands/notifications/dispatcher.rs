// src/application/commands/notifications/dispatcher.rs
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::delivery::NotificationSender,
        resilience::{CircuitBreaker, CircuitBreakerConfig, RetryPolicy, with_retry},
    },
    domain::notification::{DeliveryChannel, Notification},
};
use std::{collections::HashMap, sync::Arc};

/// Routes a notification to the sender of each of its channels.
///
/// In-app delivery is the stored row itself and is called directly. Every
/// other channel goes through its own circuit breaker wrapping a retry loop.
pub struct NotificationDispatcher {
    senders: HashMap<DeliveryChannel, Arc<dyn NotificationSender>>,
    breakers: HashMap<DeliveryChannel, CircuitBreaker>,
    retry: RetryPolicy,
}

impl NotificationDispatcher {
    pub fn new(
        senders: Vec<Arc<dyn NotificationSender>>,
        retry: RetryPolicy,
        breaker: CircuitBreakerConfig,
    ) -> Self {
        let mut by_channel = HashMap::new();
        let mut breakers = HashMap::new();
        for sender in senders {
            let channel = sender.channel();
            if channel != DeliveryChannel::InApp {
                breakers.insert(
                    channel,
                    CircuitBreaker::new(channel.as_str().to_lowercase(), breaker),
                );
            }
            by_channel.insert(channel, sender);
        }
        Self {
            senders: by_channel,
            breakers,
            retry,
        }
    }

    pub fn breaker(&self, channel: DeliveryChannel) -> Option<&CircuitBreaker> {
        self.breakers.get(&channel)
    }

    /// Attempts every channel of `notification` and returns the first failure,
    /// if any.
    pub async fn deliver(&self, notification: &Notification) -> ApplicationResult<()> {
        let mut first_error = None;

        for &channel in &notification.channels {
            if let Err(err) = self.deliver_on(channel, notification).await {
                tracing::error!(
                    notification_id = %notification.id,
                    channel = %channel,
                    error = %err,
                    "notification delivery failed"
                );
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn deliver_on(
        &self,
        channel: DeliveryChannel,
        notification: &Notification,
    ) -> ApplicationResult<()> {
        let sender: &dyn NotificationSender = self
            .senders
            .get(&channel)
            .map(|s| s.as_ref())
            .ok_or_else(|| {
                ApplicationError::internal(format!("no sender configured for channel {channel}"))
            })?;

        match self.breakers.get(&channel) {
            None => sender.send(notification).await,
            Some(breaker) => {
                breaker
                    .call(|| {
                        with_retry(&self.retry, channel.as_str(), move || {
                            sender.send(notification)
                        })
                    })
                    .await
            }
        }
    }
}
