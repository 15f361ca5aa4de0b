use super::map_sqlx;
use crate::domain::audit::{
    AuditDraft, AuditLogCursor, AuditLogEntry, AuditLogPage, AuditLogRepository, GENESIS_HASH,
    chain,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// Advisory lock key taken for the duration of every append transaction.
const AUDIT_CHAIN_LOCK_KEY: i64 = 0x4155_4449_545f_4c4f;

const SELECT_COLUMNS: &str =
    "SELECT id, actor_id, action, entity, entity_id, ip, metadata, ts, prev_hash, immutable_hash FROM audit_logs";

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    actor_id: String,
    action: String,
    entity: String,
    entity_id: Option<String>,
    ip: Option<String>,
    metadata: Option<Value>,
    ts: DateTime<Utc>,
    prev_hash: String,
    immutable_hash: String,
}

impl From<AuditLogRow> for AuditLogEntry {
    fn from(row: AuditLogRow) -> Self {
        AuditLogEntry {
            id: row.id,
            actor_id: row.actor_id,
            action: row.action,
            entity: row.entity,
            entity_id: row.entity_id,
            ip: row.ip,
            metadata: row.metadata,
            ts: row.ts,
            prev_hash: row.prev_hash,
            immutable_hash: row.immutable_hash,
        }
    }
}

enum AuditFilter<'a> {
    All,
    Actor(&'a str),
    Entity(&'a str, &'a str),
}

impl PostgresAuditLogRepository {
    async fn fetch_page(
        &self,
        filter: AuditFilter<'_>,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = (limit as i64) + 1;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COLUMNS);
        let mut has_where = false;
        match filter {
            AuditFilter::All => {}
            AuditFilter::Actor(actor_id) => {
                builder.push(" WHERE actor_id = ");
                builder.push_bind(actor_id);
                has_where = true;
            }
            AuditFilter::Entity(entity, entity_id) => {
                builder.push(" WHERE entity = ");
                builder.push_bind(entity);
                builder.push(" AND entity_id = ");
                builder.push_bind(entity_id);
                has_where = true;
            }
        }

        if let Some(cursor) = cursor {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("(ts, id) < (");
            builder.push_bind(cursor.ts);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }

        builder.push(" ORDER BY ts DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut items: Vec<AuditLogEntry> = rows.into_iter().map(Into::into).collect();
        let mut next_cursor = None;
        if items.len() > limit as usize {
            items.pop();
            if let Some(last) = items.last() {
                next_cursor = Some(AuditLogCursor::new(last.ts, last.id).encode());
            }
        }

        Ok((items, next_cursor))
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn append(&self, draft: AuditDraft) -> DomainResult<AuditLogEntry> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Held until commit or rollback; serializes head lookup and insert.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(AUDIT_CHAIN_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let head = sqlx::query_scalar::<_, String>(
            "SELECT immutable_hash FROM audit_logs ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        let prev_hash = head.unwrap_or_else(|| GENESIS_HASH.to_string());
        let immutable_hash = chain::seal(&prev_hash, &draft)?;

        let entry = &draft.entry;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO audit_logs (actor_id, action, entity, entity_id, ip, metadata, ts, prev_hash, immutable_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(&entry.actor_id)
        .bind(&entry.action)
        .bind(&entry.entity)
        .bind(entry.entity_id.as_deref())
        .bind(entry.ip.as_deref())
        .bind(entry.metadata.as_ref())
        .bind(draft.ts)
        .bind(&prev_hash)
        .bind(&immutable_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        Ok(AuditLogEntry::from_draft(id, draft, prev_hash, immutable_hash))
    }

    async fn list(&self, limit: u32, cursor: Option<AuditLogCursor>) -> DomainResult<AuditLogPage> {
        self.fetch_page(AuditFilter::All, limit, cursor).await
    }

    async fn find_by_actor(
        &self,
        actor_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        self.fetch_page(AuditFilter::Actor(actor_id), limit, cursor)
            .await
    }

    async fn find_by_entity(
        &self,
        entity: &str,
        entity_id: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<AuditLogPage> {
        self.fetch_page(AuditFilter::Entity(entity, entity_id), limit, cursor)
            .await
    }

    async fn scan_from(&self, after_id: Option<i64>, limit: u32) -> DomainResult<Vec<AuditLogEntry>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COLUMNS);
        if let Some(after_id) = after_id {
            builder.push(" WHERE id > ");
            builder.push_bind(after_id);
        }
        builder.push(" ORDER BY id ASC LIMIT ");
        builder.push_bind(i64::from(limit.max(1)));

        let rows = builder
            .build_query_as::<AuditLogRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
