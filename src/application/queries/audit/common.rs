use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::audit::AuditLogCursor,
};

pub(super) fn normalize_limit(limit: u32) -> u32 {
    const DEFAULT_LIMIT: u32 = 20;
    const MAX_LIMIT: u32 = 100;

    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

pub(super) fn decode_cursor(cursor: Option<&str>) -> ApplicationResult<Option<AuditLogCursor>> {
    match cursor {
        Some(token) => Ok(Some(
            AuditLogCursor::decode(token).map_err(ApplicationError::from)?,
        )),
        None => Ok(None),
    }
}
