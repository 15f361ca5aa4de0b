// src/infrastructure/storage.rs
use crate::config::StorageBackend;
use crate::domain::{audit::AuditLogRepository, notification::NotificationRepository};
use crate::infrastructure::{
    database,
    repositories::{
        InMemoryAuditLogRepository, InMemoryNotificationRepository, PostgresAuditLogRepository,
        PostgresNotificationRepository,
    },
};
use std::sync::Arc;

pub struct Repositories {
    pub audit_logs: Arc<dyn AuditLogRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

/// Connects to the configured store, applying migrations for PostgreSQL.
pub async fn connect(storage: &StorageBackend) -> anyhow::Result<Repositories> {
    match storage {
        StorageBackend::Postgres {
            url,
            max_connections,
        } => {
            let pool = database::init_pool(url, *max_connections).await?;
            database::run_migrations(&pool).await?;
            tracing::info!(max_connections, "connected to postgres");
            Ok(Repositories {
                audit_logs: Arc::new(PostgresAuditLogRepository::new(pool.clone())),
                notifications: Arc::new(PostgresNotificationRepository::new(pool)),
            })
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, data is lost on restart");
            Ok(Repositories {
                audit_logs: Arc::new(InMemoryAuditLogRepository::new()),
                notifications: Arc::new(InMemoryNotificationRepository::new()),
            })
        }
    }
}
