//! Audit Trail Integration Tests
//!
//! Tests for append/read ordering, limits, and durability across both
//! trail backends.

use std::collections::HashMap;
use std::sync::Arc;

use tempfile::TempDir;

use veracity::{
    AuditEventKind, AuditTrail, JsonlTrail, ReadOrder, SourceKind, SqliteTrail,
    VerificationSystem,
};

fn populated_system(trail: Arc<dyn AuditTrail>) -> VerificationSystem {
    let mut system = VerificationSystem::new(trail);
    system
        .submit_evidence(
            "report shows a 70% reduction",
            SourceKind::Attachment,
            HashMap::new(),
        )
        .unwrap();
    system
        .submit_evidence(
            "audit measured the cut at 71%",
            SourceKind::ExternalApi,
            HashMap::new(),
        )
        .unwrap();
    system
}

#[test]
fn test_entries_preserve_decision_order() {
    let trail = Arc::new(SqliteTrail::in_memory().unwrap());
    let system = populated_system(trail.clone());

    system.verify("70%").unwrap();

    let entries = trail.read(10, ReadOrder::OldestFirst).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].kind, AuditEventKind::Ingestion);
    assert_eq!(entries[1].kind, AuditEventKind::Ingestion);
    assert_eq!(entries[2].kind, AuditEventKind::Verification);
}

#[test]
fn test_newest_first_is_reverse_of_append_order() {
    let trail = Arc::new(SqliteTrail::in_memory().unwrap());
    let system = populated_system(trail.clone());
    system.verify("70%").unwrap();

    let oldest = trail.read(10, ReadOrder::OldestFirst).unwrap();
    let newest = trail.read(10, ReadOrder::NewestFirst).unwrap();

    let forward: Vec<_> = oldest.iter().map(|e| e.id).collect();
    let mut backward: Vec<_> = newest.iter().map(|e| e.id).collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn test_verification_entry_carries_full_decision() {
    let trail = Arc::new(SqliteTrail::in_memory().unwrap());
    let system = populated_system(trail.clone());

    let result = system.verify("70%").unwrap();

    let entries = trail.read(1, ReadOrder::NewestFirst).unwrap();
    let entry = &entries[0];

    assert_eq!(entry.claim.as_deref(), Some("70%"));
    assert_eq!(entry.status, Some(result.status));
    assert_eq!(entry.confidence, Some(result.confidence));
    assert_eq!(entry.evidence_ids, result.supporting_evidence_ids);
    assert_eq!(
        entry.reasoning_trace.as_deref(),
        Some(result.reasoning_trace.as_str())
    );
}

#[test]
fn test_sqlite_trail_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("audit.db");

    {
        let trail = Arc::new(SqliteTrail::open(&db_path).unwrap());
        let system = populated_system(trail);
        system.verify("70%").unwrap();
    }

    let reopened = SqliteTrail::open(&db_path).unwrap();
    let entries = reopened.read(10, ReadOrder::OldestFirst).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].kind, AuditEventKind::Verification);
}

#[test]
fn test_jsonl_trail_end_to_end() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("audit.jsonl");

    let trail = Arc::new(JsonlTrail::new(&path));
    let system = populated_system(trail.clone());
    system.verify("70%").unwrap();

    assert!(path.exists());

    let entries = trail.read(10, ReadOrder::OldestFirst).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].kind, AuditEventKind::Verification);
    assert_eq!(entries[2].claim.as_deref(), Some("70%"));

    // a fresh handle over the same file replays the same entries
    let reread = JsonlTrail::new(&path);
    let replayed = reread.read(10, ReadOrder::OldestFirst).unwrap();
    assert_eq!(replayed.len(), 3);
    assert_eq!(replayed[0].id, entries[0].id);
}

#[test]
fn test_read_limit_returns_most_recent() {
    let trail = Arc::new(SqliteTrail::in_memory().unwrap());
    let system = populated_system(trail.clone());
    system.verify("70%").unwrap();

    let entries = trail.read(1, ReadOrder::NewestFirst).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, AuditEventKind::Verification);
}

#[test]
fn test_concurrent_appends_keep_total_order() {
    let trail = Arc::new(SqliteTrail::in_memory().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let trail = trail.clone();
            std::thread::spawn(move || {
                let mut system = VerificationSystem::new(trail);
                system
                    .submit_evidence(
                        &format!("thread {} reports 70%", i),
                        SourceKind::Email,
                        HashMap::new(),
                    )
                    .unwrap();
                system.verify("70%").unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // every append landed, none interleaved into a torn row
    let entries = trail.read(100, ReadOrder::OldestFirst).unwrap();
    assert_eq!(entries.len(), 8);
    let verifications = entries
        .iter()
        .filter(|e| e.kind == AuditEventKind::Verification)
        .count();
    assert_eq!(verifications, 4);
}
