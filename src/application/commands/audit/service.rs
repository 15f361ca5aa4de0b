// src/application/commands/audit/service.rs
use std::sync::Arc;

use crate::{application::ports::time::Clock, domain::audit::AuditLogRepository};

pub struct AuditCommandService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AuditCommandService {
    pub fn new(repo: Arc<dyn AuditLogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}
