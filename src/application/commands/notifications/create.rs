// src/application/commands/notifications/create.rs
use super::NotificationCommandService;
use crate::{
    application::{
        dto::{Actor, NotificationDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::NewAuditEntry,
        notification::{
            DeliveryChannel, Notification, NotificationPriority, NotificationStatus, TemplateKind,
        },
    },
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct NotificationOptions {
    /// Defaults to `MEDIUM`.
    pub priority: Option<NotificationPriority>,
    /// Defaults to in-app only.
    pub channels: Option<Vec<DeliveryChannel>>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub action_url: Option<String>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct CreateNotificationCommand {
    pub template: TemplateKind,
    pub recipient_id: String,
    pub variables: BTreeMap<String, String>,
    pub options: NotificationOptions,
}

fn resolve_channels(channels: Option<Vec<DeliveryChannel>>) -> ApplicationResult<Vec<DeliveryChannel>> {
    let Some(requested) = channels else {
        return Ok(vec![DeliveryChannel::InApp]);
    };
    if requested.is_empty() {
        return Err(ApplicationError::validation(
            "at least one delivery channel is required",
        ));
    }
    let mut unique = Vec::with_capacity(requested.len());
    for channel in requested {
        if !unique.contains(&channel) {
            unique.push(channel);
        }
    }
    Ok(unique)
}

impl NotificationCommandService {
    /// Renders `command.template`, stores the notification and, unless it is
    /// scheduled for later, delivers it right away. Notifications scheduled
    /// for later stay `PENDING` and out of the inbox until dispatched.
    ///
    /// Persistence and delivery failures are logged and returned.
    pub async fn create_from_template(
        &self,
        actor: &Actor,
        command: CreateNotificationCommand,
    ) -> ApplicationResult<NotificationDto> {
        let CreateNotificationCommand {
            template,
            recipient_id,
            variables,
            options,
        } = command;

        let recipient_id = recipient_id.trim().to_string();
        if recipient_id.is_empty() {
            return Err(ApplicationError::validation("recipient id cannot be empty"));
        }
        let channels = resolve_channels(options.channels)?;
        let now = self.clock.now();
        // Rows delivered inline are stored already claimed so the dispatch
        // loop never picks them up as well.
        let deliver_now = options.scheduled_for.is_none_or(|at| at <= now);
        let status = if deliver_now {
            NotificationStatus::Sending
        } else {
            NotificationStatus::Pending
        };

        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id,
            template,
            content: template.render(&variables),
            priority: options.priority.unwrap_or_default(),
            channels,
            status,
            scheduled_for: options.scheduled_for,
            sent_at: None,
            read_at: None,
            action_url: options.action_url,
            metadata: options.metadata,
            created_at: now,
        };

        let mut stored = self.repo.insert(notification).await.map_err(|err| {
            tracing::error!(
                template = %template,
                error = %err,
                "failed to store notification"
            );
            ApplicationError::from(err)
        })?;

        self.audit
            .record(
                NewAuditEntry::new(actor.id.clone(), "notification_created", "notifications")
                    .entity_id(stored.id.to_string())
                    .metadata(json!({
                        "template": template.as_str(),
                        "recipientId": stored.recipient_id,
                        "channels": stored.channels.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
                        "priority": stored.priority.as_str(),
                    })),
            )
            .await;

        if deliver_now {
            self.deliver_and_mark(&mut stored).await?;
        } else {
            tracing::info!(
                notification_id = %stored.id,
                scheduled_for = ?stored.scheduled_for,
                "notification scheduled for later delivery"
            );
        }

        Ok(stored.into())
    }

    /// Delivers `notification` and records the outcome on it and in storage.
    pub(super) async fn deliver_and_mark(&self, notification: &mut Notification) -> ApplicationResult<()> {
        match self.dispatcher.deliver(notification).await {
            Ok(()) => {
                let sent_at = self.clock.now();
                self.repo
                    .set_status(notification.id, NotificationStatus::Sent, Some(sent_at))
                    .await?;
                notification.status = NotificationStatus::Sent;
                notification.sent_at = Some(sent_at);
                tracing::info!(
                    notification_id = %notification.id,
                    recipient_id = %notification.recipient_id,
                    "notification delivered"
                );
                Ok(())
            }
            Err(err) => {
                if let Err(status_err) = self
                    .repo
                    .set_status(notification.id, NotificationStatus::Failed, None)
                    .await
                {
                    tracing::error!(
                        notification_id = %notification.id,
                        error = %status_err,
                        "failed to mark notification as failed"
                    );
                }
                notification.status = NotificationStatus::Failed;
                Err(err)
            }
        }
    }
}
