//! Verification verdicts.
//!
//! A `VerificationResult` is created fresh per verification call and
//! never mutated afterwards. It references evidence by id only.

use serde::{Deserialize, Serialize};

/// Outcome of checking a claim against the evidence collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// At least two corroborating evidences (numeric) or strong lexical
    /// overlap (textual)
    VerifiedTrue,
    /// No corroborating evidence found
    VerifiedFalse,
    /// Not enough signal either way
    Inconclusive,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::VerifiedTrue => "verified_true",
            VerdictStatus::VerifiedFalse => "verified_false",
            VerdictStatus::Inconclusive => "inconclusive",
        }
    }
}

/// The full result of one verification call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The claim that was checked, verbatim
    pub claim_text: String,

    /// Final verdict
    pub status: VerdictStatus,

    /// Heuristic strength indicator in [0, 1]; not a calibrated probability
    pub confidence: f64,

    /// Ids of the evidences that support the claim, in examination order.
    /// Always a subset of the ids that were passed in; never contains
    /// duplicates.
    pub supporting_evidence_ids: Vec<String>,

    /// Human-readable explanation of the decision. Never empty, even for
    /// degenerate inputs.
    pub reasoning_trace: String,
}
