use crate::domain::audit::{AuditLogEntry, ChainBreak, ChainVerification};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: i64,
    pub actor_id: String,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<String>,
    pub ip: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub ts: DateTime<Utc>,
    pub prev_hash: String,
    pub immutable_hash: String,
}

impl From<AuditLogEntry> for AuditLogDto {
    fn from(e: AuditLogEntry) -> Self {
        Self {
            id: e.id,
            actor_id: e.actor_id,
            action: e.action,
            entity: e.entity,
            entity_id: e.entity_id,
            ip: e.ip,
            metadata: e.metadata,
            ts: e.ts,
            prev_hash: e.prev_hash,
            immutable_hash: e.immutable_hash,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChainBreakDto {
    /// Zero-based position of the first broken entry in insertion order.
    pub position: u64,
    pub entry_id: i64,
    /// `broken_link` or `hash_mismatch`.
    pub kind: String,
    pub expected_hash: String,
    pub stored_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChainVerificationDto {
    pub valid: bool,
    pub entries_checked: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_break: Option<ChainBreakDto>,
}

impl From<ChainBreak> for ChainBreakDto {
    fn from(b: ChainBreak) -> Self {
        Self {
            position: b.position,
            entry_id: b.entry_id,
            kind: b.kind.as_str().to_string(),
            expected_hash: b.expected_hash,
            stored_hash: b.stored_hash,
        }
    }
}

impl From<ChainVerification> for ChainVerificationDto {
    fn from(v: ChainVerification) -> Self {
        Self {
            valid: v.is_valid(),
            entries_checked: v.entries_checked,
            first_break: v.first_break.map(Into::into),
        }
    }
}
