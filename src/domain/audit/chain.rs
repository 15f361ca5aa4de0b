// src/domain/audit/chain.rs
//! Hash chaining for the audit trail.
//!
//! Every entry stores `SHA256(prev_hash || canonical_payload)` as lowercase
//! hex, where `prev_hash` is the hash of the entry before it or the literal
//! [`GENESIS_HASH`] for the first entry. The canonical payload is compact JSON
//! with a fixed key order:
//!
//! ```text
//! {"actorId":..,"action":..,"entity":..,"entityId":..,"ip":..,"metadata":..,"ts":"2024-01-01T00:00:00.000Z"}
//! ```

use super::entity::{AuditDraft, AuditLogEntry};
use crate::domain::errors::DomainResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};

pub const GENESIS_HASH: &str = "genesis";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditPayload<'a> {
    pub actor_id: &'a str,
    pub action: &'a str,
    pub entity: &'a str,
    pub entity_id: Option<&'a str>,
    pub ip: Option<&'a str>,
    pub metadata: Option<Value>,
    #[serde(serialize_with = "serialize_ts")]
    pub ts: DateTime<Utc>,
}

fn serialize_ts<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Object keys are ordered lexicographically at every depth, independent of
/// how the map was built or how storage (jsonb) reordered it.
fn sorted_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::with_capacity(map.len());
            for key in keys {
                out.insert(key.clone(), sorted_keys(&map[key.as_str()]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted_keys).collect()),
        other => other.clone(),
    }
}

impl AuditPayload<'_> {
    pub fn canonical(&self) -> DomainResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<'a> From<&'a AuditDraft> for AuditPayload<'a> {
    fn from(draft: &'a AuditDraft) -> Self {
        let entry = &draft.entry;
        Self {
            actor_id: &entry.actor_id,
            action: &entry.action,
            entity: &entry.entity,
            entity_id: entry.entity_id.as_deref(),
            ip: entry.ip.as_deref(),
            metadata: entry.metadata.as_ref().map(sorted_keys),
            ts: draft.ts,
        }
    }
}

impl<'a> From<&'a AuditLogEntry> for AuditPayload<'a> {
    fn from(entry: &'a AuditLogEntry) -> Self {
        Self {
            actor_id: &entry.actor_id,
            action: &entry.action,
            entity: &entry.entity,
            entity_id: entry.entity_id.as_deref(),
            ip: entry.ip.as_deref(),
            metadata: entry.metadata.as_ref().map(sorted_keys),
            ts: entry.ts,
        }
    }
}

pub fn compute_hash(prev_hash: &str, canonical_payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(canonical_payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash for `draft` when chained onto `prev_hash`.
pub fn seal(prev_hash: &str, draft: &AuditDraft) -> DomainResult<String> {
    let payload = AuditPayload::from(draft).canonical()?;
    Ok(compute_hash(prev_hash, &payload))
}

/// Hash a stored entry would have when chained onto `prev_hash`.
pub fn rehash(prev_hash: &str, entry: &AuditLogEntry) -> DomainResult<String> {
    let payload = AuditPayload::from(entry).canonical()?;
    Ok(compute_hash(prev_hash, &payload))
}

/// Rebuilds every hash of `entries` (in insertion order) from raw field values,
/// ignoring the stored hashes.
pub fn recompute_chain(entries: &[AuditLogEntry]) -> DomainResult<Vec<String>> {
    let mut running = GENESIS_HASH.to_string();
    let mut hashes = Vec::with_capacity(entries.len());
    for entry in entries {
        running = rehash(&running, entry)?;
        hashes.push(running.clone());
    }
    Ok(hashes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainBreakKind {
    /// The stored `prev_hash` does not point at the preceding entry.
    BrokenLink,
    /// The entry's payload no longer hashes to its stored hash.
    HashMismatch,
}

impl ChainBreakKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrokenLink => "broken_link",
            Self::HashMismatch => "hash_mismatch",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBreak {
    /// Zero-based position in insertion order.
    pub position: u64,
    pub entry_id: i64,
    pub kind: ChainBreakKind,
    pub expected_hash: String,
    pub stored_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainVerification {
    pub entries_checked: u64,
    pub first_break: Option<ChainBreak>,
}

impl ChainVerification {
    pub fn is_valid(&self) -> bool {
        self.first_break.is_none()
    }
}

/// Incremental verifier, fed entries in insertion order. Stops recording once
/// the first break is found.
#[derive(Debug)]
pub struct ChainVerifier {
    running: String,
    checked: u64,
    first_break: Option<ChainBreak>,
}

impl Default for ChainVerifier {
    fn default() -> Self {
        Self {
            running: GENESIS_HASH.to_string(),
            checked: 0,
            first_break: None,
        }
    }
}

impl ChainVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` once a break has been recorded.
    pub fn feed(&mut self, entry: &AuditLogEntry) -> DomainResult<bool> {
        if self.first_break.is_some() {
            return Ok(false);
        }

        let position = self.checked;
        self.checked += 1;

        if entry.prev_hash != self.running {
            self.first_break = Some(ChainBreak {
                position,
                entry_id: entry.id,
                kind: ChainBreakKind::BrokenLink,
                expected_hash: self.running.clone(),
                stored_hash: entry.prev_hash.clone(),
            });
            return Ok(false);
        }

        let expected = rehash(&self.running, entry)?;
        if expected != entry.immutable_hash {
            self.first_break = Some(ChainBreak {
                position,
                entry_id: entry.id,
                kind: ChainBreakKind::HashMismatch,
                expected_hash: expected,
                stored_hash: entry.immutable_hash.clone(),
            });
            return Ok(false);
        }

        self.running = expected;
        Ok(true)
    }

    pub fn finish(self) -> ChainVerification {
        ChainVerification {
            entries_checked: self.checked,
            first_break: self.first_break,
        }
    }
}

pub fn verify_entries(entries: &[AuditLogEntry]) -> DomainResult<ChainVerification> {
    let mut verifier = ChainVerifier::new();
    for entry in entries {
        if !verifier.feed(entry)? {
            break;
        }
    }
    Ok(verifier.finish())
}
