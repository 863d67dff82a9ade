//! veracity - Evidence-backed claim verification engine
//!
//! Checks whether a short natural-language claim is corroborated by a
//! collection of previously ingested evidence records, producing a
//! verdict, a confidence score, and a human-readable reasoning trace.
//!
//! # Architecture
//!
//! The system is built around an append-only audit trail:
//! - Every ingestion and every verification decision is recorded as an
//!   immutable audit entry
//! - Evidence records are immutable after ingestion, identified by a
//!   deterministic content hash
//! - Verification is a pure computation over the in-memory evidence
//!   collection plus one synchronous trail append
//!
//! # Modules
//!
//! - `audit`: Append-only audit trail (SQLite and JSONL backends)
//! - `core`: Verification logic (engine, numeric/textual verifiers, system facade)
//! - `domain`: Data contracts (Evidence, VerificationResult)
//! - `extract`: Pure text extractors (keywords, numeric values)
//! - `ingest`: Turning raw payloads into evidence records
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Verify a claim against evidence files
//! veracity verify "paper usage dropped by 70%" --evidence report.txt
//!
//! # Run the built-in demo scenario
//! veracity demo
//!
//! # Inspect the audit trail
//! veracity log --limit 10
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod extract;
pub mod ingest;

// Re-export main types at crate root for convenience
pub use crate::core::{SystemError, VerificationEngine, VerificationSystem};
pub use audit::{AuditEntry, AuditEventKind, AuditTrail, JsonlTrail, ReadOrder, SqliteTrail};
pub use domain::{Evidence, SourceKind, VerdictStatus, VerificationResult};
pub use extract::{extract_numeric, keywords, NumericKind, NumericValue};
pub use ingest::IngestionEngine;
