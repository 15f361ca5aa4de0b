// src/infrastructure/repositories/mod.rs
mod error;
mod memory_audit_log;
mod memory_notification;
mod postgres_audit_log;
mod postgres_notification;

pub use error::map_sqlx;
pub use memory_audit_log::InMemoryAuditLogRepository;
pub use memory_notification::InMemoryNotificationRepository;
pub use postgres_audit_log::PostgresAuditLogRepository;
pub use postgres_notification::PostgresNotificationRepository;
