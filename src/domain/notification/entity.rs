// src/domain/notification/entity.rs
use super::template::{RenderedContent, TemplateKind};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl NotificationPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl FromStr for NotificationPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            other => Err(DomainError::Validation(format!(
                "unknown notification priority: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeliveryChannel {
    InApp,
    Email,
    Sms,
}

impl DeliveryChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InApp => "IN_APP",
            Self::Email => "EMAIL",
            Self::Sms => "SMS",
        }
    }
}

impl fmt::Display for DeliveryChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryChannel {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "IN_APP" => Ok(Self::InApp),
            "EMAIL" => Ok(Self::Email),
            "SMS" => Ok(Self::Sms),
            other => Err(DomainError::Validation(format!(
                "unknown delivery channel: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Stored, waiting for its schedule.
    Pending,
    /// Claimed by exactly one deliverer.
    Sending,
    Sent,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sending => "SENDING",
            Self::Sent => "SENT",
            Self::Failed => "FAILED",
        }
    }
}

impl FromStr for NotificationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SENDING" => Ok(Self::Sending),
            "SENT" => Ok(Self::Sent),
            "FAILED" => Ok(Self::Failed),
            other => Err(DomainError::Persistence(format!(
                "unknown notification status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: String,
    pub template: TemplateKind,
    pub content: RenderedContent,
    pub priority: NotificationPriority,
    pub channels: Vec<DeliveryChannel>,
    pub status: NotificationStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
    pub action_url: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Pending rows have not reached the recipient, not even in-app.
    pub fn is_visible_to_recipient(&self) -> bool {
        self.status != NotificationStatus::Pending
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}
