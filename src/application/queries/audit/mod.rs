mod common;
mod list;
mod service;
mod verify;

pub use list::{ListAuditLogsByActorQuery, ListAuditLogsByEntityQuery, ListAuditLogsQuery};
pub use service::AuditQueryService;
