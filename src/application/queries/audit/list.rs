use super::{AuditQueryService, common};
use crate::application::{
    dto::{AuditLogDto, CursorPage},
    error::{ApplicationError, ApplicationResult},
};

pub struct ListAuditLogsQuery {
    pub limit: u32,
    pub cursor: Option<String>,
}

pub struct ListAuditLogsByActorQuery {
    pub actor_id: String,
    pub limit: u32,
    pub cursor: Option<String>,
}

pub struct ListAuditLogsByEntityQuery {
    pub entity: String,
    pub entity_id: String,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    pub async fn list_audit_logs(
        &self,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        let limit = common::normalize_limit(query.limit);
        let typed_cursor = common::decode_cursor(query.cursor.as_deref())?;

        let (items, next_cursor) = self
            .repo
            .list(limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        Ok(CursorPage::from_rows(items, next_cursor))
    }

    pub async fn list_by_actor(
        &self,
        query: ListAuditLogsByActorQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        let limit = common::normalize_limit(query.limit);
        let typed_cursor = common::decode_cursor(query.cursor.as_deref())?;
        let (items, next_cursor) = self
            .repo
            .find_by_actor(&query.actor_id, limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        Ok(CursorPage::from_rows(items, next_cursor))
    }

    pub async fn list_by_entity(
        &self,
        query: ListAuditLogsByEntityQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        let limit = common::normalize_limit(query.limit);
        let typed_cursor = common::decode_cursor(query.cursor.as_deref())?;
        let (items, next_cursor) = self
            .repo
            .find_by_entity(&query.entity, &query.entity_id, limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        Ok(CursorPage::from_rows(items, next_cursor))
    }
}
