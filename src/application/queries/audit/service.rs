use std::sync::Arc;

use crate::domain::audit::AuditLogRepository;

const DEFAULT_VERIFY_BATCH: u32 = 500;

pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
    pub(super) batch_size: u32,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self {
            repo,
            batch_size: DEFAULT_VERIFY_BATCH,
        }
    }

    /// Page size used when streaming the chain for verification.
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}
