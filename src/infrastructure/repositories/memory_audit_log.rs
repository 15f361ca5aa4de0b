use crate::domain::audit::{
    AuditDraft, AuditLogCursor, AuditLogEntry, AuditLogPage, AuditLogRepository, GENESIS_HASH,
    chain,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Process-local audit store. The whole append runs under one async mutex so
/// the chain head cannot be read twice before it is extended.
#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    entries: Mutex<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored entry in insertion order.
    pub async fn snapshot(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().await.clone()
    }

    async fn page<F>(&self, limit: u32, cursor: Option<AuditLogCursor>, keep: F) -> AuditLogPage
    where
        F: Fn(&AuditLogEntry) -> bool,
    {
        let limit = limit.clamp(1, 100) as usize;
        let entries = self.entries.lock().await;

        let mut matching: Vec<&AuditLogEntry> = entries.iter().filter(|e| keep(e)).collect();
        matching.sort_by(|a, b| (b.ts, b.id).cmp(&(a.ts, a.id)));

        let mut items: Vec<AuditLogEntry> = matching
            .into_iter()
            .filter(|e| match &cursor {
                Some(c) => (e.ts, e.id) < (c.ts, c.id),
                None => true,
            })
            .take(limit + 1)
            .cloned()
            .collect();

        let mut next_cursor = None;
        if items.len() > limit {
            items.pop();
            if let Some(last) = items.last() {
                next_cursor = Some(AuditLogCursor::new(last.ts, last.id).encode());
            }
        }
        (items, next_cursor)
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, draft: AuditDraft) -> DomainResult<AuditLogEntry> {
        let mut entries = self.entries.lock().await;

        let prev_hash = entries
            .last()
            .map(|e| e.immutable_hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string());
        let immutable_hash = chain::seal(&prev_hash, &draft)?;
        let id = entries.last().map_or(1, |e| e.id + 1);

        let entry = AuditLogEntry::from_draft(id, draft, prev_hash, immutable_hash);
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self, limit: u32, cursor: Option<AuditLogCursor>) -> DomainResult<AuditLogPage> {
        Ok(self.page(limit, cursor, |_| true).await)
    }

    async fn find_by_actor(
        &self,
        actor_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        Ok(self.page(limit, cursor, |e| e.actor_id == actor_id).await)
    }

    async fn find_by_entity(
        &self,
        entity: &str,
        entity_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        Ok(self
            .page(limit, cursor, |e| {
                e.entity == entity && e.entity_id.as_deref() == Some(entity_id)
            })
            .await)
    }

    async fn scan_from(&self, after_id: Option<i64>, limit: u32) -> DomainResult<Vec<AuditLogEntry>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .filter(|e| after_id.is_none_or(|after| e.id > after))
            .take(limit.max(1) as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::{NewAuditEntry, chain::verify_entries};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn draft(actor: &str, secs: i64) -> AuditDraft {
        let ts = Utc.timestamp_opt(1_704_067_200 + secs, 0).unwrap();
        AuditDraft::new(NewAuditEntry::new(actor, "user_login", "users"), ts).unwrap()
    }

    #[tokio::test]
    async fn first_entry_chains_onto_genesis() {
        let repo = InMemoryAuditLogRepository::new();
        let entry = repo.append(draft("u1", 0)).await.unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(entry.prev_hash, GENESIS_HASH);
    }

    #[tokio::test]
    async fn concurrent_appends_form_a_single_chain() {
        let repo = Arc::new(InMemoryAuditLogRepository::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.append(draft("u1", i)).await.unwrap() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = repo.snapshot().await;
        let mut prevs: Vec<_> = entries.iter().map(|e| e.prev_hash.clone()).collect();
        prevs.sort();
        prevs.dedup();
        assert_eq!(prevs.len(), 32);
        assert!(verify_entries(&entries).unwrap().is_valid());
    }

    #[tokio::test]
    async fn pages_newest_first_with_cursor() {
        let repo = InMemoryAuditLogRepository::new();
        for i in 0..5 {
            repo.append(draft("u1", i)).await.unwrap();
        }

        let (first, cursor) = repo.list(2, None).await.unwrap();
        assert_eq!(first.iter().map(|e| e.id).collect::<Vec<_>>(), vec![5, 4]);
        let cursor = AuditLogCursor::decode(&cursor.unwrap()).unwrap();

        let (second, _) = repo.list(2, Some(cursor)).await.unwrap();
        assert_eq!(second.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 2]);
    }
}
