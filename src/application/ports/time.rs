// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of server-assigned instants: audit `ts`, notification `created_at`
/// and the due check of scheduled deliveries.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
