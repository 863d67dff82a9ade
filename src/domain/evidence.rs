//! Evidence records and deterministic identifier derivation.
//!
//! An evidence record is created once at ingestion and never mutated.
//! Its identifier is derived from the content, the source kind, and the
//! ingestion timestamp, so re-ingesting the same payload at a different
//! time produces a distinct record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Where a piece of evidence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// An email message
    Email,
    /// A file attachment (report, meeting minutes, ...)
    Attachment,
    /// A structured payload from an external API
    ExternalApi,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Email => "email",
            SourceKind::Attachment => "attachment",
            SourceKind::ExternalApi => "external_api",
        }
    }
}

/// A single immutable evidence record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// Deterministic identifier (16 hex chars)
    pub id: String,

    /// Raw textual content the verifiers operate on
    pub content: String,

    /// Where this evidence came from
    pub source_kind: SourceKind,

    /// When this evidence was ingested
    pub timestamp: DateTime<Utc>,

    /// Free-form metadata captured at ingestion (sender, endpoint, ...)
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Evidence {
    /// Create an evidence record, deriving its id from the inputs
    pub fn new(
        content: String,
        source_kind: SourceKind,
        ingested_at: DateTime<Utc>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        let id = evidence_id(&content, source_kind, ingested_at);
        Self {
            id,
            content,
            source_kind,
            timestamp: ingested_at,
            metadata,
        }
    }

    /// Short id prefix used in reasoning traces and log lines
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }
}

/// Compute a deterministic evidence ID
///
/// sha256(content + source_kind + ingestion timestamp), truncated to
/// 16 hex chars (8 bytes). Within one collection the collision
/// probability is treated as negligible; the collection itself rejects
/// duplicates on insert.
pub fn evidence_id(content: &str, source_kind: SourceKind, ingested_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update(source_kind.as_str().as_bytes());
    hasher.update(ingested_at.timestamp_micros().to_string().as_bytes());

    let result = hasher.finalize();
    hex::encode(&result[..8]) // 16 hex chars = 8 bytes
}
