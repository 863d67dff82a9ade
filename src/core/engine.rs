//! Verification engine.
//!
//! Classifies a claim as numeric or textual, delegates to the matching
//! verifier, wraps the outcome into a `VerificationResult`, and records
//! the full decision in the audit trail.
//!
//! A single `verify` call is a pure computation over the evidence slice
//! it is given plus one synchronous trail append. There is no background
//! processing and no retry; malformed claim text simply yields no
//! numeric match and falls through to the textual path.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::audit::{AuditEntry, AuditTrail};
use crate::domain::{Evidence, VerdictStatus, VerificationResult};
use crate::extract::extract_numeric;

use super::{numeric, textual};

/// Dispatches claims to the numeric or textual verifier
pub struct VerificationEngine {
    trail: Arc<dyn AuditTrail>,
}

impl VerificationEngine {
    /// Create an engine writing its decisions to the given audit trail
    pub fn new(trail: Arc<dyn AuditTrail>) -> Self {
        Self { trail }
    }

    /// Verify a claim against an ordered evidence collection.
    ///
    /// Always produces a result; "failure" outcomes are expressed through
    /// `VerdictStatus::Inconclusive` plus an explanatory trace. The only
    /// error source is the audit trail append.
    pub fn verify(&self, claim: &str, evidences: &[Evidence]) -> Result<VerificationResult> {
        if evidences.is_empty() {
            let result = VerificationResult {
                claim_text: claim.to_string(),
                status: VerdictStatus::Inconclusive,
                confidence: 0.0,
                supporting_evidence_ids: Vec::new(),
                reasoning_trace: "No evidence available for verification.".to_string(),
            };
            self.record(&result)?;
            return Ok(result);
        }

        let assessment = match extract_numeric(claim) {
            Some(value) => numeric::verify_numeric(&value, evidences),
            None => textual::verify_textual(claim, evidences),
        };

        let result = VerificationResult {
            claim_text: claim.to_string(),
            status: assessment.status,
            confidence: assessment.confidence,
            supporting_evidence_ids: assessment.supporting,
            reasoning_trace: assessment.trace,
        };
        self.record(&result)?;

        Ok(result)
    }

    fn record(&self, result: &VerificationResult) -> Result<()> {
        self.trail
            .append(&AuditEntry::verification(result, HashMap::new()))?;
        info!(
            status = result.status.as_str(),
            confidence = result.confidence,
            supporting = result.supporting_evidence_ids.len(),
            "verification recorded"
        );
        Ok(())
    }
}
