// src/domain/audit/repository.rs
use crate::domain::audit::{
    cursor::AuditLogCursor,
    entity::{AuditDraft, AuditLogEntry},
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// A page of entries, newest first, plus the encoded cursor of the next page.
pub type AuditLogPage = (Vec<AuditLogEntry>, Option<String>);

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Chains `draft` onto the current head and stores it.
    ///
    /// Reading the head, hashing and inserting must happen as one serialized
    /// step: two concurrent appends may never chain onto the same head.
    async fn append(&self, draft: AuditDraft) -> DomainResult<AuditLogEntry>;

    async fn list(&self, limit: u32, cursor: Option<AuditLogCursor>) -> DomainResult<AuditLogPage>;

    async fn find_by_actor(
        &self,
        actor_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage>;

    async fn find_by_entity(
        &self,
        entity: &str,
        entity_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage>;

    /// Entries in insertion order with `id > after_id`.
    async fn scan_from(&self, after_id: Option<i64>, limit: u32) -> DomainResult<Vec<AuditLogEntry>>;
}
