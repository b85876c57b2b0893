//! Configuration loading for the CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use signalkit_server::{PoolConfig, Settings};
use tracing::{debug, warn};

/// Outcome of one `.env` lookup
#[derive(Debug)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    Missing(String),
    Failed { path: PathBuf, error: String },
}

/// What `load_dotenv` did, replayed once tracing is up
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub entries: Vec<DotenvStatus>,
}

impl DotenvReport {
    /// Emit the collected diagnostics through tracing
    pub fn log(&self) {
        for entry in &self.entries {
            match entry {
                DotenvStatus::Loaded(path) => debug!("Loaded .env from {}", path.display()),
                DotenvStatus::Missing(reason) => debug!("No .env in current directory: {}", reason),
                DotenvStatus::Failed { path, error } => {
                    warn!("Failed to load {}: {}", path.display(), error)
                }
            }
        }
    }
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.signalkit/.env
///
/// Runs before tracing exists (RUST_LOG may come from .env), so diagnostics
/// are returned rather than logged.
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    // dotenvy never overwrites variables that are already set
    report.entries.push(match dotenvy::dotenv() {
        Ok(path) => DotenvStatus::Loaded(path),
        Err(e) if e.not_found() => DotenvStatus::Missing(e.to_string()),
        Err(e) => DotenvStatus::Failed {
            path: PathBuf::from(".env"),
            error: e.to_string(),
        },
    });

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        report.entries.extend(load_file(&env_file));
    }

    report
}

/// Load one optional .env file; `None` when it does not exist.
fn load_file(path: &Path) -> Option<DotenvStatus> {
    if !path.exists() {
        return None;
    }
    Some(match dotenvy::from_path(path) {
        Ok(()) => DotenvStatus::Loaded(path.to_path_buf()),
        Err(e) => DotenvStatus::Failed {
            path: path.to_path_buf(),
            error: e.to_string(),
        },
    })
}

/// Get the signalkit config directory path (~/.signalkit)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".signalkit"))
}

/// Read settings from the environment, letting `--database-url` win.
pub fn settings(database_url: Option<String>) -> Result<Settings> {
    let mut settings = Settings::from_env().context("Invalid environment configuration")?;
    if database_url.is_some() {
        settings.database_url = database_url;
    }
    Ok(settings)
}

/// Pool settings, failing with a hint when no database is configured.
pub fn pool_config(settings: &Settings) -> Result<PoolConfig> {
    settings.pool_config().context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.signalkit/.env",
    )
}
