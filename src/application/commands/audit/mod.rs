// src/application/commands/audit/mod.rs
mod record;
mod service;

pub use service::AuditCommandService;
