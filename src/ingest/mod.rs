//! Evidence ingestion.
//!
//! Turns raw text, structured JSON payloads, and email-shaped input into
//! immutable evidence records, and writes an ingestion entry to the
//! audit trail for each record produced.
//!
//! A malformed structured payload is caught here, logged, and yields
//! zero evidences; it never propagates as a fault into the verification
//! engine.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditTrail};
use crate::domain::{Evidence, SourceKind};

/// Converts raw payloads into evidence records
pub struct IngestionEngine {
    trail: Arc<dyn AuditTrail>,
}

impl IngestionEngine {
    /// Create an ingestion engine writing to the given audit trail
    pub fn new(trail: Arc<dyn AuditTrail>) -> Self {
        Self { trail }
    }

    /// Ingest plain text as one evidence record
    pub fn ingest_text(
        &self,
        content: &str,
        source_kind: SourceKind,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<Evidence> {
        let evidence = Evidence::new(content.to_string(), source_kind, Utc::now(), metadata);

        self.trail.append(&AuditEntry::ingestion(&evidence))?;
        info!(
            id = %evidence.id,
            kind = source_kind.as_str(),
            bytes = content.len(),
            "ingested evidence"
        );

        Ok(evidence)
    }

    /// Ingest a JSON payload, extracting one evidence per element.
    ///
    /// Accepts a single object or an array of objects. Each object
    /// contributes one `ExternalApi` evidence whose content is its
    /// `content` field (the whole object when absent, re-serialized) and
    /// whose metadata comes from its `metadata` field.
    ///
    /// A payload that fails to parse is logged and yields `Ok(vec![])`.
    pub fn ingest_json(&self, payload: &str) -> Result<Vec<Evidence>> {
        let data: serde_json::Value = match serde_json::from_str(payload) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "discarding malformed JSON payload");
                return Ok(Vec::new());
            }
        };

        let items = match data {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };

        let mut evidences = Vec::with_capacity(items.len());
        for item in items {
            let content_value = item.get("content").unwrap_or(&item);
            let content = serde_json::to_string(content_value)?;

            let metadata = item
                .get("metadata")
                .and_then(|m| m.as_object())
                .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default();

            evidences.push(self.ingest_text(&content, SourceKind::ExternalApi, metadata)?);
        }

        Ok(evidences)
    }

    /// Ingest an email as one evidence record.
    ///
    /// Subject, sender, and body are folded into a single content block;
    /// the envelope fields are kept in the metadata.
    pub fn ingest_email(
        &self,
        subject: &str,
        body: &str,
        sender: &str,
        received_at: Option<DateTime<Utc>>,
    ) -> Result<Evidence> {
        let content = format!("Subject: {}\nFrom: {}\nBody: {}", subject, sender, body);
        let received_at = received_at.unwrap_or_else(Utc::now);

        let metadata = HashMap::from([
            ("sender".to_string(), serde_json::json!(sender)),
            ("subject".to_string(), serde_json::json!(subject)),
            (
                "received_at".to_string(),
                serde_json::json!(received_at.to_rfc3339()),
            ),
        ]);

        self.ingest_text(&content, SourceKind::Email, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEventKind, ReadOrder, SqliteTrail};

    fn test_engine() -> (IngestionEngine, Arc<SqliteTrail>) {
        let trail = Arc::new(SqliteTrail::in_memory().unwrap());
        (IngestionEngine::new(trail.clone()), trail)
    }

    #[test]
    fn test_ingest_text_derives_id_and_logs() {
        let (engine, trail) = test_engine();

        let evidence = engine
            .ingest_text(
                "paper usage dropped by 70%",
                SourceKind::Email,
                HashMap::new(),
            )
            .unwrap();

        assert_eq!(evidence.id.len(), 16);
        assert!(evidence.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(evidence.source_kind, SourceKind::Email);

        let entries = trail.read(10, ReadOrder::NewestFirst).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, AuditEventKind::Ingestion);
        assert_eq!(entries[0].evidence_ids, vec![evidence.id]);
    }

    #[test]
    fn test_ingest_json_object() {
        let (engine, _trail) = test_engine();

        let payload = r#"{"content": "reduction measured at 71.2", "metadata": {"source": "finance-api"}}"#;
        let evidences = engine.ingest_json(payload).unwrap();

        assert_eq!(evidences.len(), 1);
        assert_eq!(evidences[0].source_kind, SourceKind::ExternalApi);
        assert_eq!(evidences[0].content, "\"reduction measured at 71.2\"");
        assert_eq!(
            evidences[0].metadata.get("source"),
            Some(&serde_json::json!("finance-api"))
        );
    }

    #[test]
    fn test_ingest_json_array() {
        let (engine, trail) = test_engine();

        let payload = r#"[
            {"content": "first report"},
            {"content": "second report"}
        ]"#;
        let evidences = engine.ingest_json(payload).unwrap();

        assert_eq!(evidences.len(), 2);
        let entries = trail.read(10, ReadOrder::OldestFirst).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_ingest_json_without_content_field() {
        let (engine, _trail) = test_engine();

        let payload = r#"{"metrics": {"paper_reduction_percent": 71.2}}"#;
        let evidences = engine.ingest_json(payload).unwrap();

        assert_eq!(evidences.len(), 1);
        // the whole object becomes the content
        assert!(evidences[0].content.contains("71.2"));
    }

    #[test]
    fn test_ingest_malformed_json_yields_no_evidence() {
        let (engine, trail) = test_engine();

        let evidences = engine.ingest_json("{not valid json").unwrap();

        assert!(evidences.is_empty());
        assert!(trail.read(10, ReadOrder::NewestFirst).unwrap().is_empty());
    }

    #[test]
    fn test_ingest_email_format() {
        let (engine, _trail) = test_engine();

        let evidence = engine
            .ingest_email(
                "Q2 results",
                "Paper consumption fell by 70%.",
                "pm@example.org",
                None,
            )
            .unwrap();

        assert_eq!(evidence.source_kind, SourceKind::Email);
        assert!(evidence.content.starts_with("Subject: Q2 results\n"));
        assert!(evidence.content.contains("From: pm@example.org"));
        assert!(evidence.content.contains("Body: Paper consumption fell"));
        assert_eq!(
            evidence.metadata.get("sender"),
            Some(&serde_json::json!("pm@example.org"))
        );
    }
}
