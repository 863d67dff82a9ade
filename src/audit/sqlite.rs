//! SQLite-backed audit trail.
//!
//! One `audit_log` table; the autoincrementing `seq` column provides the
//! total append order. The connection sits behind a mutex so concurrent
//! appends serialize into a single-writer order.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::domain::VerdictStatus;

use super::{AuditEntry, AuditEventKind, AuditTrail, ReadOrder};

/// Audit trail stored in an embedded SQLite database
pub struct SqliteTrail {
    conn: Mutex<Connection>,
}

impl SqliteTrail {
    /// Open (or create) a trail database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit directory: {}", parent.display())
            })?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open audit database: {}", path.display()))?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a transient in-memory trail (used by tests and the demo)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS audit_log (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                event_type TEXT NOT NULL,
                claim TEXT,
                evidence_ids TEXT NOT NULL,
                status TEXT,
                confidence REAL,
                reasoning TEXT,
                metadata TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create audit_log table")?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("audit connection lock poisoned"))
    }
}

impl AuditTrail for SqliteTrail {
    fn append(&self, entry: &AuditEntry) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO audit_log
             (id, timestamp, event_type, claim, evidence_ids, status, confidence, reasoning, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.id.to_string(),
                entry.timestamp.to_rfc3339(),
                entry.kind.as_str(),
                entry.claim,
                serde_json::to_string(&entry.evidence_ids)
                    .context("Failed to serialize evidence ids")?,
                entry.status.map(|s| s.as_str()),
                entry.confidence,
                entry.reasoning_trace,
                serde_json::to_string(&entry.metadata).context("Failed to serialize metadata")?,
            ],
        )
        .context("Failed to insert audit entry")?;

        Ok(())
    }

    fn read(&self, limit: usize, order: ReadOrder) -> Result<Vec<AuditEntry>> {
        let conn = self.lock()?;

        let sql = match order {
            ReadOrder::NewestFirst => {
                "SELECT id, timestamp, event_type, claim, evidence_ids, status, confidence, reasoning, metadata
                 FROM audit_log ORDER BY seq DESC LIMIT ?1"
            }
            ReadOrder::OldestFirst => {
                "SELECT id, timestamp, event_type, claim, evidence_ids, status, confidence, reasoning, metadata
                 FROM audit_log ORDER BY seq ASC LIMIT ?1"
            }
        };

        let mut stmt = conn.prepare(sql).context("Failed to prepare audit query")?;
        let rows = stmt
            .query_map(params![limit as i64], row_to_entry)
            .context("Failed to query audit entries")?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.context("Failed to read audit row")?);
        }

        Ok(entries)
    }
}

/// Map one `audit_log` row back to an entry
fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditEntry> {
    let id: String = row.get(0)?;
    let timestamp: String = row.get(1)?;
    let event_type: String = row.get(2)?;
    let claim: Option<String> = row.get(3)?;
    let evidence_ids: String = row.get(4)?;
    let status: Option<String> = row.get(5)?;
    let confidence: Option<f64> = row.get(6)?;
    let reasoning_trace: Option<String> = row.get(7)?;
    let metadata: String = row.get(8)?;

    Ok(AuditEntry {
        id: Uuid::parse_str(&id).map_err(|e| invalid_column(0, e))?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp)
            .map_err(|e| invalid_column(1, e))?
            .with_timezone(&Utc),
        kind: kind_from_str(&event_type).map_err(|e| invalid_column(2, e))?,
        claim,
        evidence_ids: serde_json::from_str(&evidence_ids).map_err(|e| invalid_column(4, e))?,
        status: status
            .map(|s| status_from_str(&s))
            .transpose()
            .map_err(|e| invalid_column(5, e))?,
        confidence,
        reasoning_trace,
        metadata: serde_json::from_str::<HashMap<String, serde_json::Value>>(&metadata)
            .map_err(|e| invalid_column(8, e))?,
    })
}

fn invalid_column<E>(index: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
}

fn kind_from_str(s: &str) -> std::result::Result<AuditEventKind, StoredValueError> {
    match s {
        "ingestion" => Ok(AuditEventKind::Ingestion),
        "verification" => Ok(AuditEventKind::Verification),
        other => Err(StoredValueError::new("event kind", other)),
    }
}

fn status_from_str(s: &str) -> std::result::Result<VerdictStatus, StoredValueError> {
    match s {
        "verified_true" => Ok(VerdictStatus::VerifiedTrue),
        "verified_false" => Ok(VerdictStatus::VerifiedFalse),
        "inconclusive" => Ok(VerdictStatus::Inconclusive),
        other => Err(StoredValueError::new("verdict status", other)),
    }
}

/// A stored column held a value this version does not recognize
#[derive(Debug, thiserror::Error)]
#[error("unrecognized {field} in audit log: {value}")]
struct StoredValueError {
    field: &'static str,
    value: String,
}

impl StoredValueError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}
