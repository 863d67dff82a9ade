//! Command-line interface for veracity.
//!
//! Provides commands for verifying claims against evidence files,
//! running the built-in demo scenario, and inspecting the audit trail.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::audit::{AuditEventKind, AuditTrail, JsonlTrail, ReadOrder, SqliteTrail};
use crate::config::{self, AuditBackend};
use crate::core::VerificationSystem;
use crate::domain::{SourceKind, VerificationResult};

/// veracity - Evidence-backed claim verification engine
#[derive(Parser, Debug)]
#[command(name = "veracity")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify a claim against evidence files
    Verify {
        /// The claim to check
        claim: String,

        /// Text file(s) to load as attachment evidence (repeatable)
        #[arg(short, long)]
        evidence: Vec<PathBuf>,

        /// JSON file to ingest as external-API evidence
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Run the built-in demo scenario
    Demo,

    /// Show recent audit trail entries
    Log {
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Verify {
                claim,
                evidence,
                json,
            } => execute_verify(&claim, &evidence, json.as_deref()),
            Commands::Demo => execute_demo(),
            Commands::Log { limit } => execute_log(limit),
            Commands::Config => execute_config(),
        }
    }
}

/// Open the configured audit trail backend
fn open_trail() -> Result<Arc<dyn AuditTrail>> {
    let config = config::config()?;

    let trail: Arc<dyn AuditTrail> = match config.audit_backend {
        AuditBackend::Sqlite => Arc::new(SqliteTrail::open(&config.audit_path)?),
        AuditBackend::Jsonl => Arc::new(JsonlTrail::new(&config.audit_path)),
    };

    Ok(trail)
}

/// Execute the `verify` command
fn execute_verify(claim: &str, evidence_files: &[PathBuf], json: Option<&std::path::Path>) -> Result<()> {
    let mut system = VerificationSystem::new(open_trail()?);

    for path in evidence_files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read evidence file: {}", path.display()))?;
        let metadata = HashMap::from([(
            "path".to_string(),
            serde_json::json!(path.display().to_string()),
        )]);
        system.submit_evidence(&content, SourceKind::Attachment, metadata)?;
    }

    if let Some(path) = json {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON payload: {}", path.display()))?;
        system.submit_json(&payload)?;
    }

    let result = system.verify(claim)?;
    print_result(&result, system.evidence_count())?;

    Ok(())
}

/// Execute the `demo` command: a paperless-office scenario against a
/// transient in-memory trail
fn execute_demo() -> Result<()> {
    println!("veracity demo: paperless-office initiative");
    println!("{}", "=".repeat(60));

    let trail = Arc::new(SqliteTrail::in_memory()?);
    let mut system = VerificationSystem::new(trail);

    // Evidence 1: status email from the project manager
    system.submit_email(
        "Q2 results - paperless initiative",
        "Happy to share the first-half results. We cut paper consumption \
         by roughly 70% across the administrative teams, saving about \
         $45,000 in office supplies. Well done everyone.",
        "project.manager@example.org",
    )?;

    // Evidence 2: finance report fetched from an external API
    system.submit_json(
        r#"{
            "content": {"paper_reduction_percent": 71.2, "period": "Q2", "savings_usd": 44850},
            "metadata": {"endpoint": "finance.api/reports", "version": "v2"}
        }"#,
    )?;

    // Evidence 3: sustainability committee meeting minutes
    system.submit_evidence(
        "MEETING MINUTES - SUSTAINABILITY COMMITTEE\n\
         Agenda: environmental impact of the paperless initiative.\n\
         Resolution: the initiative achieved a 70% reduction in paper \
         consumption over the last six months. The committee approved \
         its continuation and suggested expanding to other departments.",
        SourceKind::Attachment,
        HashMap::from([("author".to_string(), serde_json::json!("M. Santos"))]),
    )?;

    // Evidence 4: a contradicting informal report
    system.submit_email(
        "Informal feedback",
        "Some departments still report heavy paper use. Early estimates \
         suggest a reduction of only 45% overall.",
        "feedback@example.org",
    )?;

    println!("{} evidences loaded.\n", system.evidence_count());

    let claim = "The paperless initiative cut paper consumption by 70%";
    println!("Verifying claim: '{}'\n", claim);

    let result = system.verify(claim)?;
    print_result(&result, system.evidence_count())?;

    println!("\nAudit trail (newest first):");
    for entry in system.audit_log(10)? {
        println!(
            "  - {} {} at {}",
            entry.kind.as_str(),
            entry
                .claim
                .as_deref()
                .unwrap_or_else(|| entry.evidence_ids.first().map(String::as_str).unwrap_or("-")),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}

/// Execute the `log` command
fn execute_log(limit: usize) -> Result<()> {
    let trail = open_trail()?;
    let entries = trail.read(limit, ReadOrder::NewestFirst)?;

    if entries.is_empty() {
        println!("Audit trail is empty.");
        return Ok(());
    }

    for entry in entries {
        match entry.kind {
            AuditEventKind::Ingestion => {
                println!(
                    "{}  ingestion     {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.evidence_ids.join(", ")
                );
            }
            AuditEventKind::Verification => {
                println!(
                    "{}  verification  '{}' -> {} ({:.2})",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.claim.as_deref().unwrap_or("?"),
                    entry.status.map(|s| s.as_str()).unwrap_or("?"),
                    entry.confidence.unwrap_or(0.0)
                );
            }
        }
    }

    Ok(())
}

/// Execute the `config` command
fn execute_config() -> Result<()> {
    let config = config::config()?;

    println!("home:          {}", config.home.display());
    println!("audit backend: {:?}", config.audit_backend);
    println!("audit path:    {}", config.audit_path.display());
    match &config.config_file {
        Some(path) => println!("config file:   {}", path.display()),
        None => println!("config file:   (none found)"),
    }

    Ok(())
}

/// Print a verification result as pretty JSON
fn print_result(result: &VerificationResult, evidences_analyzed: usize) -> Result<()> {
    let output = serde_json::json!({
        "claim_text": result.claim_text,
        "status": result.status,
        "confidence": result.confidence,
        "supporting_evidence_ids": result.supporting_evidence_ids,
        "reasoning_trace": result.reasoning_trace,
        "evidences_analyzed": evidences_analyzed,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
