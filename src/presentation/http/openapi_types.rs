use crate::application::dto::{AuditLogDto, CursorPage};
use serde::{Deserialize, Serialize};

// Simple status response used by health endpoints and docs.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuditLogListResponse {
    pub items: Vec<AuditLogDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl From<CursorPage<AuditLogDto>> for AuditLogListResponse {
    fn from(page: CursorPage<AuditLogDto>) -> Self {
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}
