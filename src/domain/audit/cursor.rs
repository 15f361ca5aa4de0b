// src/domain/audit/cursor.rs
use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position for newest-first audit listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogCursor {
    pub ts: DateTime<Utc>,
    pub id: i64,
}

fn invalid() -> DomainError {
    DomainError::Validation("invalid cursor token".into())
}

impl AuditLogCursor {
    pub fn new(ts: DateTime<Utc>, id: i64) -> Self {
        Self { ts, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.ts.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (ts, id) = raw.split_once('|').ok_or_else(invalid)?;
        let ts = DateTime::parse_from_rfc3339(ts)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(ts, id))
    }
}
