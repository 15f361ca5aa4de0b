// src/application/commands/audit/record.rs
use super::AuditCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::audit::{AuditDraft, AuditLogEntry, NewAuditEntry},
};

impl AuditCommandService {
    /// Appends `entry` to the audit chain.
    ///
    /// Best-effort: failures are logged and swallowed so the operation being
    /// audited is never blocked or rolled back by the audit trail.
    pub async fn record(&self, entry: NewAuditEntry) {
        let actor_id = entry.actor_id.clone();
        let action = entry.action.clone();
        let entity = entry.entity.clone();

        match self.append(entry).await {
            Ok(stored) => {
                tracing::info!(
                    target: "audit",
                    id = stored.id,
                    actor_id = %stored.actor_id,
                    action = %stored.action,
                    entity = %stored.entity,
                    entity_id = stored.entity_id.as_deref().unwrap_or(""),
                    ip = stored.ip.as_deref().unwrap_or(""),
                    hash = %stored.immutable_hash,
                    "audit event recorded"
                );
            }
            Err(err) => {
                tracing::error!(
                    target: "audit",
                    actor_id = %actor_id,
                    action = %action,
                    entity = %entity,
                    error = %err,
                    "failed to record audit event"
                );
            }
        }
    }

    async fn append(&self, entry: NewAuditEntry) -> ApplicationResult<AuditLogEntry> {
        let draft = AuditDraft::new(entry, self.clock.now())?;
        Ok(self.repo.append(draft).await?)
    }
}
