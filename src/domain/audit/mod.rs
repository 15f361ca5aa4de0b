// src/domain/audit/mod.rs
pub mod chain;
pub mod cursor;
pub mod entity;
pub mod repository;

pub use chain::{ChainBreak, ChainBreakKind, ChainVerification, ChainVerifier, GENESIS_HASH};
pub use cursor::AuditLogCursor;
pub use entity::{AuditDraft, AuditLogEntry, NewAuditEntry};
pub use repository::{AuditLogPage, AuditLogRepository};
