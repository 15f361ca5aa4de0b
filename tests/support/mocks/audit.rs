// tests/support/mocks/audit.rs
use async_trait::async_trait;
use lms_core::domain::audit::{
    AuditDraft, AuditLogCursor, AuditLogEntry, AuditLogPage, AuditLogRepository, GENESIS_HASH,
    NewAuditEntry, chain,
};
use lms_core::domain::errors::{DomainError, DomainResult};
use lms_core::infrastructure::repositories::InMemoryAuditLogRepository;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::Barrier;

/// サンプルの監査エントリ
pub fn sample_entry(actor: &str, action: &str, entity: &str) -> NewAuditEntry {
    NewAuditEntry::new(actor, action, entity)
}

/// 先頭ハッシュの読み取りと書き込みを分離した（直列化しない）リポジトリ。
/// すべての追記が先頭を読み終えるまでバリアで待つため、分岐が必ず発生する。
pub struct UnserializedAuditRepo {
    entries: Mutex<Vec<AuditLogEntry>>,
    barrier: Barrier,
}

impl UnserializedAuditRepo {
    pub fn new(concurrent_writers: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            barrier: Barrier::new(concurrent_writers),
        }
    }

    pub fn snapshot(&self) -> Vec<AuditLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLogRepository for UnserializedAuditRepo {
    async fn append(&self, draft: AuditDraft) -> DomainResult<AuditLogEntry> {
        let prev_hash = self
            .entries
            .lock()
            .unwrap()
            .last()
            .map(|e| e.immutable_hash.clone())
            .unwrap_or_else(|| GENESIS_HASH.to_string());

        self.barrier.wait().await;

        let hash = chain::seal(&prev_hash, &draft)?;
        let mut entries = self.entries.lock().unwrap();
        let id = entries.len() as i64 + 1;
        let entry = AuditLogEntry::from_draft(id, draft, prev_hash, hash);
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self, _: u32, _: Option<AuditLogCursor>) -> DomainResult<AuditLogPage> {
        Ok((self.snapshot(), None))
    }

    async fn find_by_actor(
        &self,
        _: &str,
        _: u32,
        _: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        Ok((Vec::new(), None))
    }

    async fn find_by_entity(
        &self,
        _: &str,
        _: &str,
        _: u32,
        _: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        Ok((Vec::new(), None))
    }

    async fn scan_from(&self, after_id: Option<i64>, limit: u32) -> DomainResult<Vec<AuditLogEntry>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|e| after_id.is_none_or(|after| e.id > after))
            .take(limit as usize)
            .collect())
    }
}

/// すべての操作が永続化エラーになるリポジトリ
pub struct FailingAuditRepo;

fn unavailable() -> DomainError {
    DomainError::Persistence("audit store unavailable".into())
}

#[async_trait]
impl AuditLogRepository for FailingAuditRepo {
    async fn append(&self, _: AuditDraft) -> DomainResult<AuditLogEntry> {
        Err(unavailable())
    }

    async fn list(&self, _: u32, _: Option<AuditLogCursor>) -> DomainResult<AuditLogPage> {
        Err(unavailable())
    }

    async fn find_by_actor(
        &self,
        _: &str,
        _: u32,
        _: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        Err(unavailable())
    }

    async fn find_by_entity(
        &self,
        _: &str,
        _: &str,
        _: u32,
        _: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        Err(unavailable())
    }

    async fn scan_from(&self, _: Option<i64>, _: u32) -> DomainResult<Vec<AuditLogEntry>> {
        Err(unavailable())
    }
}

/// インメモリ監査ストアを包み、読み取り時に差し替えたエントリを返す。
/// 保存層での改ざん（ハッシュを更新しない書き換え）を再現する。
#[derive(Default)]
pub struct TamperingAuditRepo {
    inner: InMemoryAuditLogRepository,
    tampered: Mutex<HashMap<i64, AuditLogEntry>>,
}

impl TamperingAuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// 同じ id のエントリを以後の読み取りで `entry` に置き換える
    pub fn tamper(&self, entry: AuditLogEntry) {
        self.tampered.lock().unwrap().insert(entry.id, entry);
    }

    pub async fn snapshot(&self) -> Vec<AuditLogEntry> {
        self.apply(self.inner.snapshot().await)
    }

    fn apply(&self, entries: Vec<AuditLogEntry>) -> Vec<AuditLogEntry> {
        let tampered = self.tampered.lock().unwrap();
        entries
            .into_iter()
            .map(|e| tampered.get(&e.id).cloned().unwrap_or(e))
            .collect()
    }
}

#[async_trait]
impl AuditLogRepository for TamperingAuditRepo {
    async fn append(&self, draft: AuditDraft) -> DomainResult<AuditLogEntry> {
        self.inner.append(draft).await
    }

    async fn list(&self, limit: u32, cursor: Option<AuditLogCursor>) -> DomainResult<AuditLogPage> {
        let (items, next) = self.inner.list(limit, cursor).await?;
        Ok((self.apply(items), next))
    }

    async fn find_by_actor(
        &self,
        actor_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        let (items, next) = self.inner.find_by_actor(actor_id, limit, cursor).await?;
        Ok((self.apply(items), next))
    }

    async fn find_by_entity(
        &self,
        entity: &str,
        entity_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        let (items, next) = self
            .inner
            .find_by_entity(entity, entity_id, limit, cursor)
            .await?;
        Ok((self.apply(items), next))
    }

    async fn scan_from(&self, after_id: Option<i64>, limit: u32) -> DomainResult<Vec<AuditLogEntry>> {
        Ok(self.apply(self.inner.scan_from(after_id, limit).await?))
    }
}
