//! Append-only audit trail.
//!
//! Every ingestion and every verification decision is recorded as an
//! immutable entry in an ordered log. The trail is the traceability
//! backbone of the system: past decisions can be reconstructed from it.
//!
//! The trail is abstracted as a two-operation interface (`append`,
//! `read`); any durable ordered store satisfies it as long as append
//! order is preserved under concurrency. Two backends are provided:
//! - `SqliteTrail`: embedded SQLite database
//! - `JsonlTrail`: newline-delimited JSON file
//!
//! A trail handle is passed into each component at construction. There
//! is no process-wide trail instance.

pub mod jsonl;
pub mod sqlite;

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Evidence, VerdictStatus, VerificationResult};

pub use jsonl::JsonlTrail;
pub use sqlite::SqliteTrail;

/// The two kinds of auditable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    /// An evidence record entered the system
    Ingestion,
    /// A claim was checked against the evidence collection
    Verification,
}

impl AuditEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventKind::Ingestion => "ingestion",
            AuditEventKind::Verification => "verification",
        }
    }
}

/// One immutable entry in the audit trail.
///
/// A single flat record covers both event kinds; the verification-only
/// fields are absent on ingestion entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier for this entry
    pub id: Uuid,

    /// When the recorded event occurred
    pub timestamp: DateTime<Utc>,

    /// Kind of event
    pub kind: AuditEventKind,

    /// The claim that was checked (verification only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,

    /// Ingestion: the single ingested evidence id.
    /// Verification: the supporting evidence ids, in examination order.
    pub evidence_ids: Vec<String>,

    /// Final verdict (verification only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VerdictStatus>,

    /// Confidence score (verification only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Reasoning trace (verification only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_trace: Option<String>,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl AuditEntry {
    /// Entry recording the ingestion of one evidence record
    pub fn ingestion(evidence: &Evidence) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: evidence.timestamp,
            kind: AuditEventKind::Ingestion,
            claim: None,
            evidence_ids: vec![evidence.id.clone()],
            status: None,
            confidence: None,
            reasoning_trace: None,
            metadata: evidence.metadata.clone(),
        }
    }

    /// Entry recording one complete verification decision
    pub fn verification(
        result: &VerificationResult,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind: AuditEventKind::Verification,
            claim: Some(result.claim_text.clone()),
            evidence_ids: result.supporting_evidence_ids.clone(),
            status: Some(result.status),
            confidence: Some(result.confidence),
            reasoning_trace: Some(result.reasoning_trace.clone()),
            metadata,
        }
    }
}

/// Read direction for `AuditTrail::read`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOrder {
    /// Most recent entries first (the default for inspection)
    NewestFirst,
    /// Append order
    OldestFirst,
}

/// Append-only, single-writer-ordered audit log.
///
/// Implementations must serialize concurrent appends so that entries
/// preserve a total order matching the order decisions were made.
pub trait AuditTrail: Send + Sync {
    /// Append one entry to the log
    fn append(&self, entry: &AuditEntry) -> Result<()>;

    /// Read up to `limit` entries in the given order
    fn read(&self, limit: usize, order: ReadOrder) -> Result<Vec<AuditEntry>>;
}
