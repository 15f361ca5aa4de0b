// src/domain/audit/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, SubsecRound, Utc};
use serde_json::Value;

/// Caller-supplied fields of an audit event. `ts` and the hashes are computed
/// by the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub actor_id: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<String>,
    pub ip: Option<String>,
    pub metadata: Option<Value>,
}

impl NewAuditEntry {
    pub fn new(
        actor_id: impl Into<String>,
        action: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            action: action.into(),
            entity: entity.into(),
            entity_id: None,
            ip: None,
            metadata: None,
        }
    }

    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn validate(&self) -> DomainResult<()> {
        if self.actor_id.trim().is_empty() {
            return Err(DomainError::Validation("actor id cannot be empty".into()));
        }
        if self.action.trim().is_empty() {
            return Err(DomainError::Validation("action cannot be empty".into()));
        }
        if self.entity.trim().is_empty() {
            return Err(DomainError::Validation("entity cannot be empty".into()));
        }
        Ok(())
    }
}

/// A validated entry stamped with its creation time, waiting to be chained.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditDraft {
    pub entry: NewAuditEntry,
    pub ts: DateTime<Utc>,
}

impl AuditDraft {
    /// Timestamps are kept at millisecond precision so the canonical payload
    /// survives a round-trip through storage unchanged.
    pub fn new(entry: NewAuditEntry, ts: DateTime<Utc>) -> DomainResult<Self> {
        entry.validate()?;
        Ok(Self {
            entry,
            ts: ts.trunc_subsecs(3),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogEntry {
    pub id: i64,
    pub actor_id: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<String>,
    pub ip: Option<String>,
    pub metadata: Option<Value>,
    pub ts: DateTime<Utc>,
    pub prev_hash: String,
    pub immutable_hash: String,
}

impl AuditLogEntry {
    pub fn from_draft(id: i64, draft: AuditDraft, prev_hash: String, immutable_hash: String) -> Self {
        let AuditDraft { entry, ts } = draft;
        Self {
            id,
            actor_id: entry.actor_id,
            action: entry.action,
            entity: entry.entity,
            entity_id: entry.entity_id,
            ip: entry.ip,
            metadata: entry.metadata,
            ts,
            prev_hash,
            immutable_hash,
        }
    }
}
