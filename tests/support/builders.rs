// tests/support/builders.rs
use lms_core::application::commands::notifications::{
    CreateNotificationCommand, NotificationOptions,
};
use lms_core::domain::notification::{DeliveryChannel, NotificationPriority, TemplateKind};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub struct NotificationCommandBuilder {
    template: TemplateKind,
    recipient_id: String,
    variables: BTreeMap<String, String>,
    options: NotificationOptions,
}

impl NotificationCommandBuilder {
    pub fn new(template: TemplateKind) -> Self {
        Self {
            template,
            recipient_id: "u1".into(),
            variables: BTreeMap::new(),
            options: NotificationOptions::default(),
        }
    }

    pub fn recipient(mut self, recipient_id: impl Into<String>) -> Self {
        self.recipient_id = recipient_id.into();
        self
    }

    pub fn var(mut self, name: &str, value: &str) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn channels(mut self, channels: &[DeliveryChannel]) -> Self {
        self.options.channels = Some(channels.to_vec());
        self
    }

    pub fn priority(mut self, priority: NotificationPriority) -> Self {
        self.options.priority = Some(priority);
        self
    }

    pub fn scheduled_for(mut self, at: DateTime<Utc>) -> Self {
        self.options.scheduled_for = Some(at);
        self
    }

    pub fn build(self) -> CreateNotificationCommand {
        CreateNotificationCommand {
            template: self.template,
            recipient_id: self.recipient_id,
            variables: self.variables,
            options: self.options,
        }
    }
}
