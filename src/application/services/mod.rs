// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            audit::AuditCommandService,
            notifications::{NotificationCommandService, NotificationDispatcher},
        },
        ports::time::Clock,
        queries::{audit::AuditQueryService, notifications::NotificationQueryService},
    },
    domain::{audit::AuditLogRepository, notification::NotificationRepository},
};

pub struct ApplicationServices {
    pub audit_commands: Arc<AuditCommandService>,
    pub audit_queries: Arc<AuditQueryService>,
    pub notification_commands: Arc<NotificationCommandService>,
    pub notification_queries: Arc<NotificationQueryService>,
    clock: Arc<dyn Clock>,
}

impl ApplicationServices {
    pub fn new(
        audit_log_repo: Arc<dyn AuditLogRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        dispatcher: Arc<NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let audit_commands = Arc::new(AuditCommandService::new(
            Arc::clone(&audit_log_repo),
            Arc::clone(&clock),
        ));
        let audit_queries = Arc::new(AuditQueryService::new(Arc::clone(&audit_log_repo)));

        let notification_commands = Arc::new(NotificationCommandService::new(
            Arc::clone(&notification_repo),
            dispatcher,
            Arc::clone(&audit_commands),
            Arc::clone(&clock),
        ));
        let notification_queries =
            Arc::new(NotificationQueryService::new(Arc::clone(&notification_repo)));

        Self {
            audit_commands,
            audit_queries,
            notification_commands,
            notification_queries,
            clock,
        }
    }

    /// The clock every service was built with; background tasks share it.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }
}
