//! Textual claim verification.
//!
//! Used when no numeric value can be extracted from the claim. Scores
//! each evidence by Jaccard keyword overlap with the claim and maps the
//! average/maximum relevance onto a verdict.

use std::fmt::Write;

use crate::domain::{Evidence, VerdictStatus};
use crate::extract::keywords;

use super::Assessment;

/// Minimum relevance for an evidence to count as supporting
pub const RELEVANCE_THRESHOLD: f64 = 0.3;

/// Jaccard relevance between a claim and one evidence.
///
/// Ratio of shared keywords to total distinct keywords; 0.0 when the
/// claim has no keywords or the union is empty.
pub fn relevance(claim: &str, evidence: &Evidence) -> f64 {
    let claim_keywords = keywords(claim);
    if claim_keywords.is_empty() {
        return 0.0;
    }

    let evidence_keywords = keywords(&evidence.content);
    let intersection = claim_keywords.intersection(&evidence_keywords).count();
    let union = claim_keywords.union(&evidence_keywords).count();

    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Verify a textual claim against the evidence collection.
///
/// Evidences with relevance above 0.3 support the claim. Classification:
/// - max relevance > 0.5 and average > 0.3: verified true
/// - max relevance > 0.3: inconclusive
/// - otherwise: verified false
pub fn verify_textual(claim: &str, evidences: &[Evidence]) -> Assessment {
    let mut scores = Vec::with_capacity(evidences.len());
    let mut supporting = Vec::new();

    let mut trace = format!("Checking textual claim: '{}'\n", claim);

    for evidence in evidences {
        let score = relevance(claim, evidence);
        scores.push(score);

        let _ = writeln!(
            trace,
            "  - evidence {}: relevance {:.2}",
            evidence.short_id(),
            score
        );

        if score > RELEVANCE_THRESHOLD {
            supporting.push(evidence.id.clone());
        }
    }

    if scores.is_empty() {
        trace.push_str("\nNo evidence examined.\n");
        return Assessment {
            status: VerdictStatus::Inconclusive,
            confidence: 0.0,
            supporting,
            trace,
        };
    }

    let avg_relevance = scores.iter().sum::<f64>() / scores.len() as f64;
    let max_relevance = scores.iter().cloned().fold(f64::MIN, f64::max);

    let (status, confidence) = if max_relevance > 0.5 && avg_relevance > RELEVANCE_THRESHOLD {
        (
            VerdictStatus::VerifiedTrue,
            (avg_relevance + 0.3).min(0.85),
        )
    } else if max_relevance > RELEVANCE_THRESHOLD {
        (VerdictStatus::Inconclusive, 0.5)
    } else {
        (VerdictStatus::VerifiedFalse, 0.6)
    };

    let _ = writeln!(
        trace,
        "\nAverage relevance: {:.2}, max: {:.2}",
        avg_relevance, max_relevance
    );
    let _ = writeln!(trace, "CONCLUSION: {}", status.as_str());

    Assessment {
        status,
        confidence,
        supporting,
        trace,
    }
}
