//! Data directory resolution.

use anyhow::Result;
use std::path::PathBuf;

const HAVEN_DIR: &str = ".haven";
const DB_FILE: &str = "haven.db";
const LOGS_DIR: &str = "logs";

/// Environment variable to override the Haven directory.
const HAVEN_DIR_ENV: &str = "HAVEN_DIR";

/// Resolve the Haven data directory.
/// Priority: HAVEN_DIR env var > ~/.haven/
pub fn resolve_haven_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(HAVEN_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|h| h.join(HAVEN_DIR))
        .ok_or_else(|| anyhow::anyhow!("Failed to determine home directory"))
}

/// Ensure the Haven directory exists and return its path.
pub fn ensure_haven_dir() -> Result<PathBuf> {
    let dir = resolve_haven_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the database path: ~/.haven/haven.db
pub fn ensure_database_path() -> Result<PathBuf> {
    Ok(ensure_haven_dir()?.join(DB_FILE))
}

/// Get the logs directory: ~/.haven/logs/
pub fn logs_dir() -> Result<PathBuf> {
    let dir = resolve_haven_dir()?.join(LOGS_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
