//! Configuration for veracity paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (VERACITY_HOME, VERACITY_AUDIT_PATH)
//! 2. Config file (.veracity/config.yaml)
//! 3. Defaults (~/.veracity)
//!
//! Config file discovery:
//! - Searches current directory and parents for .veracity/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Which store backs the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditBackend {
    /// Embedded SQLite database (default)
    Sqlite,
    /// Newline-delimited JSON file
    Jsonl,
}

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub audit: Option<AuditConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// System state directory (relative to config file)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    pub backend: Option<AuditBackend>,
    /// Trail location (relative to the project root)
    pub path: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to veracity home (system state)
    pub home: PathBuf,
    /// Audit trail backend
    pub audit_backend: AuditBackend,
    /// Absolute path to the audit trail store
    pub audit_path: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".veracity").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Default trail filename for a backend
fn default_audit_file(backend: AuditBackend) -> &'static str {
    match backend {
        AuditBackend::Sqlite => "audit.db",
        AuditBackend::Jsonl => "audit.jsonl",
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".veracity");

    let config_file = find_config_file();

    let (home, audit_backend, audit_path) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .veracity/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let home = if let Ok(env_home) = std::env::var("VERACITY_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            // home is relative to the .veracity/ directory
            let veracity_dir = config_path.parent().unwrap_or(Path::new("."));
            resolve_path(veracity_dir, home_path)
        } else {
            default_home.clone()
        };

        let backend = config
            .audit
            .as_ref()
            .and_then(|a| a.backend)
            .unwrap_or(AuditBackend::Sqlite);

        let audit_path = if let Ok(env_path) = std::env::var("VERACITY_AUDIT_PATH") {
            PathBuf::from(env_path)
        } else if let Some(path) = config.audit.as_ref().and_then(|a| a.path.as_ref()) {
            resolve_path(base_dir, path)
        } else {
            home.join(default_audit_file(backend))
        };

        (home, backend, audit_path)
    } else {
        let home = std::env::var("VERACITY_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let backend = AuditBackend::Sqlite;
        let audit_path = std::env::var("VERACITY_AUDIT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(default_audit_file(backend)));

        (home, backend, audit_path)
    };

    Ok(ResolvedConfig {
        home,
        audit_backend,
        audit_path,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the veracity home directory (system state)
pub fn veracity_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the audit trail location
pub fn audit_path() -> Result<PathBuf> {
    Ok(config()?.audit_path.clone())
}
