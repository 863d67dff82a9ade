//! System facade.
//!
//! `VerificationSystem` wires the ingestion engine, the verification
//! engine, and the audit trail together, and exclusively owns its
//! evidence collection for its lifetime. Evidence is kept in insertion
//! order; `verify` runs against the collection as it stands at call
//! time.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use thiserror::Error;

use crate::audit::{AuditEntry, AuditTrail, ReadOrder};
use crate::domain::{Evidence, SourceKind, VerificationResult};
use crate::ingest::IngestionEngine;

use super::VerificationEngine;

/// Errors surfaced by the evidence collection
#[derive(Debug, Clone, Error)]
pub enum SystemError {
    /// An evidence with this id is already present. Ids are content
    /// hashes, so this is either a re-submission or a (negligibly
    /// likely) hash collision; both are rejected rather than silently
    /// replacing the stored record.
    #[error("duplicate evidence id: {id}")]
    DuplicateEvidence { id: String },
}

/// Complete claim verification system
pub struct VerificationSystem {
    trail: Arc<dyn AuditTrail>,
    ingestion: IngestionEngine,
    engine: VerificationEngine,
    evidences: Vec<Evidence>,
    index: HashMap<String, usize>,
}

impl VerificationSystem {
    /// Create a system writing to the given audit trail
    pub fn new(trail: Arc<dyn AuditTrail>) -> Self {
        Self {
            ingestion: IngestionEngine::new(trail.clone()),
            engine: VerificationEngine::new(trail.clone()),
            trail,
            evidences: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add an already-ingested evidence record to the collection
    pub fn add_evidence(&mut self, evidence: Evidence) -> Result<(), SystemError> {
        if self.index.contains_key(&evidence.id) {
            return Err(SystemError::DuplicateEvidence {
                id: evidence.id.clone(),
            });
        }

        self.index.insert(evidence.id.clone(), self.evidences.len());
        self.evidences.push(evidence);
        Ok(())
    }

    /// Ingest plain text as evidence and add it to the collection,
    /// returning its id
    pub fn submit_evidence(
        &mut self,
        content: &str,
        source_kind: SourceKind,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<String> {
        let evidence = self.ingestion.ingest_text(content, source_kind, metadata)?;
        let id = evidence.id.clone();
        self.add_evidence(evidence)?;
        Ok(id)
    }

    /// Ingest a JSON payload and add every resulting evidence,
    /// returning their ids
    pub fn submit_json(&mut self, payload: &str) -> Result<Vec<String>> {
        let evidences = self.ingestion.ingest_json(payload)?;
        let mut ids = Vec::with_capacity(evidences.len());
        for evidence in evidences {
            ids.push(evidence.id.clone());
            self.add_evidence(evidence)?;
        }
        Ok(ids)
    }

    /// Ingest an email and add it to the collection, returning its id
    pub fn submit_email(&mut self, subject: &str, body: &str, sender: &str) -> Result<String> {
        let evidence = self.ingestion.ingest_email(subject, body, sender, None)?;
        let id = evidence.id.clone();
        self.add_evidence(evidence)?;
        Ok(id)
    }

    /// Verify a claim against the full evidence collection
    pub fn verify(&self, claim: &str) -> Result<VerificationResult> {
        self.engine.verify(claim, &self.evidences)
    }

    /// Look up an evidence record by id
    pub fn evidence(&self, id: &str) -> Option<&Evidence> {
        self.index.get(id).map(|&i| &self.evidences[i])
    }

    /// The evidence collection, in insertion order
    pub fn evidences(&self) -> &[Evidence] {
        &self.evidences
    }

    /// Number of evidences currently held
    pub fn evidence_count(&self) -> usize {
        self.evidences.len()
    }

    /// Read recent audit entries, newest first
    pub fn audit_log(&self, limit: usize) -> Result<Vec<AuditEntry>> {
        self.trail.read(limit, ReadOrder::NewestFirst)
    }
}
