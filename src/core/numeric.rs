//! Numeric claim verification.
//!
//! Compares the claim's extracted value against the value extracted from
//! each evidence, within a relative tolerance. Evidences that yield no
//! numeric value neither support nor refute the claim.

use std::fmt::Write;

use crate::domain::{Evidence, VerdictStatus};
use crate::extract::{extract_numeric, NumericValue};

use super::Assessment;

/// Maximum relative difference for an evidence value to count as
/// corroborating (inclusive)
pub const TOLERANCE: f64 = 0.05;

/// Absolute fallback bound used when the claim value is exactly zero,
/// where relative difference is undefined
const ZERO_CLAIM_EPSILON: f64 = 1e-9;

/// Check whether an evidence value corroborates the claim value.
///
/// The comparison is relative for a non-zero claim and degrades to an
/// absolute epsilon check when the claim value is exactly zero, where
/// relative difference is undefined.
fn within_tolerance(claim_value: f64, evidence_value: f64) -> bool {
    if claim_value == 0.0 {
        evidence_value.abs() <= ZERO_CLAIM_EPSILON
    } else {
        (evidence_value - claim_value).abs() / claim_value.abs() <= TOLERANCE
    }
}

/// Verify a numeric claim against the evidence collection.
///
/// Each evidence is re-run through the numeric extractor; evidences with
/// no extractable value are skipped. Matches within the 5% tolerance are
/// tallied and mapped onto a verdict:
/// - two or more matches: verified true
/// - exactly one match: inconclusive
/// - no match: verified false
pub fn verify_numeric(claim: &NumericValue, evidences: &[Evidence]) -> Assessment {
    let mut supporting = Vec::new();
    let mut matching_count: usize = 0;

    let mut trace = format!(
        "Checking numeric claim: {} ({})\n",
        claim.value,
        claim.kind.as_str()
    );

    for evidence in evidences {
        let Some(extracted) = extract_numeric(&evidence.content) else {
            continue;
        };

        let _ = writeln!(
            trace,
            "  - evidence {}: {} ({})",
            evidence.short_id(),
            extracted.value,
            extracted.kind.as_str()
        );

        if within_tolerance(claim.value, extracted.value) {
            supporting.push(evidence.id.clone());
            matching_count += 1;
            let _ = writeln!(trace, "    MATCH (within {}% tolerance)", TOLERANCE * 100.0);
        } else {
            let _ = writeln!(
                trace,
                "    NO MATCH (difference: {})",
                (extracted.value - claim.value).abs()
            );
        }
    }

    let (status, confidence) = if matching_count >= 2 {
        trace.push_str("\nCONCLUSION: VERIFIED (at least 2 corroborating evidences)\n");
        (
            VerdictStatus::VerifiedTrue,
            (0.6 + 0.1 * matching_count as f64).min(0.9),
        )
    } else if matching_count == 1 {
        trace.push_str("\nCONCLUSION: INCONCLUSIVE (only 1 corroborating evidence)\n");
        (VerdictStatus::Inconclusive, 0.5)
    } else {
        trace.push_str("\nCONCLUSION: FALSE (no corroborating evidence)\n");
        (VerdictStatus::VerifiedFalse, 0.7)
    };

    Assessment {
        status,
        confidence,
        supporting,
        trace,
    }
}
