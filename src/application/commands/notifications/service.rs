// src/application/commands/notifications/service.rs
use std::sync::Arc;

use super::NotificationDispatcher;
use crate::{
    application::{commands::audit::AuditCommandService, ports::time::Clock},
    domain::notification::NotificationRepository,
};

pub struct NotificationCommandService {
    pub(super) repo: Arc<dyn NotificationRepository>,
    pub(super) dispatcher: Arc<NotificationDispatcher>,
    pub(super) audit: Arc<AuditCommandService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl NotificationCommandService {
    pub fn new(
        repo: Arc<dyn NotificationRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        audit: Arc<AuditCommandService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            dispatcher,
            audit,
            clock,
        }
    }
}
